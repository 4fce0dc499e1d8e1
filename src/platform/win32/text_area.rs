// ── EDIT child-control hosting ────────────────────────────────────────────────
//
// The text area is a stock multi-line EDIT control filling the main window's
// client area.  It owns the GDI font selected into it; the background brush is
// shared with the WndProc through `Background`, because `WM_CTLCOLOREDIT`
// arrives while the shell may be busy inside a modal dialog.
//
// Drop order: `EditControl` and the last `Rc<Background>` are dropped after
// the message loop exits, when Windows has already destroyed the control.

#![allow(unsafe_code)]

use std::{cell::Cell, ffi::c_void, rc::Rc};

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{GetLastError, COLORREF, HINSTANCE, HWND, LPARAM, TRUE, WPARAM},
        Graphics::Gdi::{
            CreateFontIndirectW, CreateSolidBrush, DeleteObject, InvalidateRect, HBRUSH, HFONT,
            HGDIOBJ, LOGFONTW,
        },
        UI::{
            Input::KeyboardAndMouse::SetFocus,
            WindowsAndMessaging::{
                CreateWindowExW, GetWindowTextLengthW, GetWindowTextW, MoveWindow, SendMessageW,
                SetWindowTextW, HMENU, WINDOW_STYLE, WM_SETFONT, WS_CHILD, WS_EX_CLIENTEDGE,
                WS_VISIBLE, WS_VSCROLL,
            },
        },
    },
};

use super::{colorref, dpi, wide};
use crate::{
    config::TEXT_LEFT_PADDING,
    document::EolMode,
    error::{NotepadError, Result},
    shell::TextArea,
    style::{FontDescriptor, Rgb, Style, WEIGHT_NORMAL},
};

// ── EDIT control constants ────────────────────────────────────────────────────

const ES_MULTILINE: u32 = 0x0004;
const ES_AUTOVSCROLL: u32 = 0x0040;
const ES_NOHIDESEL: u32 = 0x0100;
const ES_WANTRETURN: u32 = 0x1000;

const EM_SETLIMITTEXT: u32 = 0x00C5;
const EM_SETMARGINS: u32 = 0x00D3;
const EC_LEFTMARGIN: usize = 0x0001;

/// Child-window identifier of the text area.
pub(crate) const EDIT_CONTROL_ID: usize = 100;

/// `LOGFONTW::lfFaceName` capacity, including the terminator.
const LF_FACESIZE: usize = 32;

// ── Font conversion ───────────────────────────────────────────────────────────

/// Build the GDI description of `font` for a window at `dpi`.
pub(crate) fn log_font(font: &FontDescriptor, dpi: u32) -> LOGFONTW {
    let mut lf = LOGFONTW {
        lfHeight: dpi::point_size_to_height(font.point_size, dpi),
        lfWeight: i32::from(font.weight),
        lfItalic: u8::from(font.italic),
        lfUnderline: u8::from(font.underline),
        lfStrikeOut: u8::from(font.strike_out),
        ..Default::default()
    };
    // Leave room for the terminator; the array is zero-filled.
    for (dst, src) in lf.lfFaceName.iter_mut().zip(font.family.encode_utf16().take(LF_FACESIZE - 1)) {
        *dst = src;
    }
    lf
}

/// Read back a font chosen in the font dialog.
///
/// `point_tenths` is `CHOOSEFONTW::iPointSize`, in tenths of a point.
pub(crate) fn font_from_log_font(lf: &LOGFONTW, point_tenths: i32) -> FontDescriptor {
    let len = lf.lfFaceName.iter().position(|&c| c == 0).unwrap_or(LF_FACESIZE);
    let weight = match u16::try_from(lf.lfWeight) {
        Ok(0) | Err(_) => WEIGHT_NORMAL,
        Ok(w) => w.clamp(100, 900),
    };
    FontDescriptor {
        family: String::from_utf16_lossy(&lf.lfFaceName[..len]),
        point_size: u32::try_from((point_tenths + 5) / 10).unwrap_or(1).max(1),
        weight,
        italic: lf.lfItalic != 0,
        underline: lf.lfUnderline != 0,
        strike_out: lf.lfStrikeOut != 0,
    }
}

// ── Background ────────────────────────────────────────────────────────────────

/// The text area's background colour and the solid brush that paints it.
pub(crate) struct Background {
    color: Cell<COLORREF>,
    brush: Cell<HBRUSH>,
}

impl Background {
    pub(crate) fn new() -> Self {
        Self {
            color: Cell::new(colorref(Rgb::WHITE)),
            brush: Cell::new(HBRUSH::default()),
        }
    }

    /// Colour to pass to `SetBkColor`.
    pub(crate) fn color(&self) -> COLORREF {
        self.color.get()
    }

    /// Brush to return from `WM_CTLCOLOREDIT`; null until the first `set`.
    pub(crate) fn brush(&self) -> HBRUSH {
        self.brush.get()
    }

    /// Start painting with `brush`, which must be a solid brush of `color`.
    /// Takes ownership of `brush` and deletes the one it replaces.
    fn replace(&self, color: COLORREF, brush: HBRUSH) {
        let old = self.brush.replace(brush);
        self.color.set(color);
        delete_brush(old);
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        delete_brush(self.brush.get());
    }
}

fn delete_brush(brush: HBRUSH) {
    if !brush.is_invalid() {
        // SAFETY: brush came from CreateSolidBrush and is no longer returned
        // from WM_CTLCOLOREDIT (it has just been replaced, or the control is gone).
        unsafe {
            let _ = DeleteObject(HGDIOBJ(brush.0));
        }
    }
}

// ── Staged style ──────────────────────────────────────────────────────────────

/// The GDI objects for a style, created but not yet handed to the control.
///
/// A failed `create` allocates nothing and leaves the control untouched.
struct StagedStyle {
    font: HFONT,
    color: COLORREF,
    brush: HBRUSH,
}

impl StagedStyle {
    fn create(style: &Style, dpi: u32) -> Result<Self> {
        let lf = log_font(&style.font, dpi);
        // SAFETY: lf is a fully initialised LOGFONTW on the stack.
        let font = unsafe { CreateFontIndirectW(&lf) };
        if font.is_invalid() {
            return Err(NotepadError::Win32 { function: "CreateFontIndirectW", code: 0 });
        }
        let color = colorref(style.background);
        // SAFETY: CreateSolidBrush has no pointer parameters.
        let brush = unsafe { CreateSolidBrush(color) };
        if brush.is_invalid() {
            delete_font(font);
            return Err(NotepadError::Win32 { function: "CreateSolidBrush", code: 0 });
        }
        Ok(Self { font, color, brush })
    }
}

// ── EditControl ───────────────────────────────────────────────────────────────

pub(crate) struct EditControl {
    hwnd: HWND,
    font: Option<HFONT>,
    background: Rc<Background>,
}

impl EditControl {
    /// Create the EDIT child inside `hwnd_parent`, with no length limit and a
    /// left text margin.
    pub(crate) fn create(
        hwnd_parent: HWND,
        hinstance: HINSTANCE,
        background: Rc<Background>,
    ) -> Result<Self> {
        let style = WS_CHILD
            | WS_VISIBLE
            | WS_VSCROLL
            | WINDOW_STYLE(ES_MULTILINE | ES_AUTOVSCROLL | ES_NOHIDESEL | ES_WANTRETURN);

        // SAFETY: "EDIT" is a system class that is always registered.
        // hwnd_parent and hinstance are valid handles from WM_CREATE.  The
        // HMENU of a child window carries its control identifier.
        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_CLIENTEDGE,
                w!("EDIT"),
                PCWSTR::null(),
                style,
                0, 0, 0, 0,
                hwnd_parent,
                HMENU(EDIT_CONTROL_ID as *mut c_void),
                hinstance,
                None,
            )
        };

        if hwnd == HWND::default() {
            // SAFETY: GetLastError reads thread-local state set by the just-
            // failed CreateWindowExW; no Win32 calls between them.
            let code = unsafe { GetLastError().0 };
            return Err(NotepadError::Win32 { function: "CreateWindowExW (EDIT)", code });
        }

        let margin = dpi::scale(TEXT_LEFT_PADDING, dpi::get_for_window(hwnd));
        // SAFETY: hwnd is a valid EDIT control.  EM_SETLIMITTEXT with 0 lifts
        // the default 32 K limit; EM_SETMARGINS takes the margin in LOWORD.
        unsafe {
            let _ = SendMessageW(hwnd, EM_SETLIMITTEXT, WPARAM(0), LPARAM(0));
            let _ = SendMessageW(hwnd, EM_SETMARGINS, WPARAM(EC_LEFTMARGIN), LPARAM(margin as isize & 0xFFFF));
        }

        Ok(Self { hwnd, font: None, background })
    }

    pub(crate) fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Fill a `width` × `height` client area.
    pub(crate) fn resize(hwnd: HWND, width: i32, height: i32) {
        // SAFETY: hwnd is the EDIT child; a failed move leaves it where it was.
        unsafe {
            let _ = MoveWindow(hwnd, 0, 0, width, height, TRUE);
        }
    }

    pub(crate) fn focus(hwnd: HWND) {
        // SAFETY: hwnd is the EDIT child on the calling (UI) thread.
        unsafe {
            let _ = SetFocus(hwnd);
        }
    }

    fn commit(&mut self, staged: StagedStyle) {
        // SAFETY: hwnd valid; WM_SETFONT with lParam = TRUE redraws at once.
        // The control does not take ownership of the font.
        unsafe {
            let _ = SendMessageW(self.hwnd, WM_SETFONT, WPARAM(staged.font.0 as usize), LPARAM(1));
        }
        if let Some(old) = self.font.replace(staged.font) {
            delete_font(old);
        }
        self.background.replace(staged.color, staged.brush);
        // SAFETY: hwnd valid; erase so the new brush paints the whole area.
        unsafe {
            let _ = InvalidateRect(self.hwnd, None, TRUE);
        }
    }
}

impl TextArea for EditControl {
    fn line_ending(&self) -> EolMode {
        EolMode::Crlf
    }

    fn text(&self) -> String {
        // SAFETY: hwnd valid; read-only query.
        let len = unsafe { GetWindowTextLengthW(self.hwnd) };
        let Ok(len) = usize::try_from(len) else {
            return String::new();
        };
        let mut buf = vec![0u16; len + 1];
        // SAFETY: buf holds len + 1 WCHARs, enough for the text and terminator.
        let copied = unsafe { GetWindowTextW(self.hwnd, &mut buf) };
        buf.truncate(usize::try_from(copied).unwrap_or(0));
        String::from_utf16_lossy(&buf)
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        let text = wide(text);
        // SAFETY: text is null-terminated UTF-16 that outlives the call.
        unsafe { SetWindowTextW(self.hwnd, PCWSTR(text.as_ptr())) }?;
        Ok(())
    }

    fn apply_style(&mut self, style: &Style) -> Result<()> {
        let staged = StagedStyle::create(style, dpi::get_for_window(self.hwnd))?;
        self.commit(staged);
        Ok(())
    }
}

impl Drop for EditControl {
    fn drop(&mut self) {
        if let Some(font) = self.font.take() {
            delete_font(font);
        }
    }
}

fn delete_font(font: HFONT) {
    // SAFETY: font came from CreateFontIndirectW and has been deselected
    // (replaced by WM_SETFONT) or its control destroyed.
    unsafe {
        let _ = DeleteObject(HGDIOBJ(font.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_font_round_trips_through_chosen_font() {
        let font: FontDescriptor = "Consolas,14,-1,5,75,1,1,0,0,0".parse().unwrap();
        let lf = log_font(&font, 96);
        assert_eq!(font_from_log_font(&lf, 140), font);
    }

    #[test]
    fn long_family_is_truncated_and_terminated() {
        let font = FontDescriptor { family: "X".repeat(40), ..FontDescriptor::default() };
        let lf = log_font(&font, 96);
        assert_eq!(lf.lfFaceName[LF_FACESIZE - 1], 0);
        assert_eq!(font_from_log_font(&lf, 120).family.len(), LF_FACESIZE - 1);
    }

    #[test]
    fn dont_care_weight_reads_as_normal() {
        let lf = LOGFONTW::default();
        assert_eq!(font_from_log_font(&lf, 95).weight, WEIGHT_NORMAL);
        assert_eq!(font_from_log_font(&lf, 95).point_size, 10);
    }

    #[test]
    fn staged_style_leaves_background_alone_until_replaced() {
        let background = Background::new();
        let blue = Rgb::new(0, 0, 255);
        let staged = StagedStyle::create(&Style { background: blue, ..Style::default() }, 96).unwrap();
        assert!(background.brush().is_invalid());
        assert_eq!(background.color(), colorref(Rgb::WHITE));

        delete_font(staged.font);
        background.replace(staged.color, staged.brush);
        assert_eq!(background.color(), colorref(blue));
        assert!(!background.brush().is_invalid());
    }
}
