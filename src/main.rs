// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (Win32 FFI).
// Each unsafe block in that module MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]
// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that log output is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// Without a window frontend only the tests reach the editor shell.
#![cfg_attr(not(windows), allow(dead_code))]

mod config;
mod document;
mod error;
mod logging;
mod menu;
mod platform;
mod shell;
mod style;

#[cfg(windows)]
fn main() {
    logging::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    if let Err(e) = platform::win32::window::run() {
        // Startup failed before or during the message loop.
        // A modal dialog is the only output a GUI-subsystem process has.
        tracing::error!(error = %e, "fatal");
        platform::win32::window::show_error_dialog(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
fn main() {
    logging::init();
    let e = error::NotepadError::UnsupportedPlatform(std::env::consts::OS);
    tracing::error!(error = %e, "fatal");
    eprintln!("notepad: {e}");
    std::process::exit(1);
}
