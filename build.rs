/// Notepad build script.
///
/// The Win32 frontend only exists on Windows. Other targets still build (the
/// editor shell and its tests are portable) but the binary refuses to start,
/// so say so at build time instead of leaving it to a runtime surprise.
fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        println!(
            "cargo:warning=notepad has no window frontend for {target_os:?}; \
             the binary will exit with an error at startup"
        );
    }

    println!("cargo:rerun-if-changed=build.rs");
}
