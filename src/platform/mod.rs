// ── Platform abstraction layer ────────────────────────────────────────────────
//
// The window frontend for each supported OS.  No `unsafe` lives here; all
// Win32 FFI is confined to the `win32` sub-module and never leaks outward.

#[cfg(windows)]
pub mod win32;
