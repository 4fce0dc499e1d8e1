// ── Win32 platform implementation ─────────────────────────────────────────────
//
// This is the only module in the codebase where `unsafe` code is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

use windows::Win32::Foundation::COLORREF;

use crate::style::Rgb;

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub mod dialogs; // common open/save/font/colour dialogs, message boxes
pub mod text_area; // the EDIT child control and its GDI objects
pub mod window; // main window, WndProc, message loop

pub(crate) mod dpi; // per-monitor DPI v2 helpers

// ── Conversions ───────────────────────────────────────────────────────────────

/// Null-terminated UTF-16 copy of `s`, for `PCWSTR` parameters.
pub(crate) fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// `Rgb` → GDI `COLORREF` (`0x00BBGGRR`).
pub(crate) fn colorref(c: Rgb) -> COLORREF {
    COLORREF(u32::from(c.r) | u32::from(c.g) << 8 | u32::from(c.b) << 16)
}

/// GDI `COLORREF` → `Rgb`.
pub(crate) fn rgb(c: COLORREF) -> Rgb {
    Rgb::new((c.0 & 0xFF) as u8, (c.0 >> 8 & 0xFF) as u8, (c.0 >> 16 & 0xFF) as u8)
}
