// ── Common dialogs ─────────────────────────────────────────────────────────────
//
// `DialogProvider` on top of the Win32 common-dialog and message-box APIs.
// Every dialog is modal to the main window and returns `Choice::Cancelled`
// on cancel or error.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::path::PathBuf;

use windows::{
    core::{PCWSTR, PWSTR},
    Win32::{
        Foundation::{COLORREF, HWND},
        UI::{
            Controls::Dialogs::{
                ChooseColorW, ChooseFontW, GetOpenFileNameW, GetSaveFileNameW, CC_FULLOPEN,
                CC_RGBINIT, CF_EFFECTS, CF_INITTOLOGFONTSTRUCT, CF_SCREENFONTS, CHOOSECOLORW,
                CHOOSEFONTW, OFN_FILEMUSTEXIST, OFN_HIDEREADONLY, OFN_OVERWRITEPROMPT,
                OFN_PATHMUSTEXIST, OPENFILENAMEW,
            },
            WindowsAndMessaging::{
                MessageBoxW, IDYES, MB_ICONERROR, MB_ICONQUESTION, MB_OK, MB_YESNO,
                MESSAGEBOX_STYLE,
            },
        },
    },
};

use super::{colorref, dpi, rgb, text_area, wide};
use crate::{
    config::{FileFilter, APP_TITLE, DEFAULT_EXTENSION},
    shell::dialogs::{Answer, Choice, DialogProvider, FileRequest},
    style::{FontDescriptor, Rgb},
};

// ── Buffer size ───────────────────────────────────────────────────────────────

/// Maximum path length in `WCHAR`s, including the null terminator.
/// `MAX_PATH` (260) is too short for modern Windows paths; use 32 768 which
/// is the documented maximum for `\\?\` extended paths.
const PATH_BUF_LEN: usize = 32_768;

// ── Win32Dialogs ──────────────────────────────────────────────────────────────

pub(crate) struct Win32Dialogs {
    owner: HWND,
    /// The sixteen custom colours of the colour dialog, kept between uses.
    custom_colors: [COLORREF; 16],
}

impl Win32Dialogs {
    pub(crate) fn new(owner: HWND) -> Self {
        Self {
            owner,
            custom_colors: [colorref(Rgb::WHITE); 16],
        }
    }

    fn file_dialog(&self, request: &FileRequest, save: bool) -> Choice<PathBuf> {
        let mut buf = vec![0u16; PATH_BUF_LEN];
        let filter = filter_string(request.filters);
        let title = wide(request.title);
        let initial_dir = wide(request.directory);
        let def_ext = wide(DEFAULT_EXTENSION);

        let flags = if save {
            OFN_OVERWRITEPROMPT | OFN_PATHMUSTEXIST
        } else {
            OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_HIDEREADONLY
        };

        let mut ofn = OPENFILENAMEW {
            lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
            hwndOwner: self.owner,
            lpstrFilter: PCWSTR(filter.as_ptr()),
            nFilterIndex: 1,
            lpstrFile: PWSTR(buf.as_mut_ptr()),
            nMaxFile: PATH_BUF_LEN as u32,
            lpstrInitialDir: PCWSTR(initial_dir.as_ptr()),
            lpstrTitle: PCWSTR(title.as_ptr()),
            lpstrDefExt: PCWSTR(def_ext.as_ptr()),
            Flags: flags,
            ..Default::default()
        };

        // SAFETY: `ofn` is fully initialised; `buf`, `filter`, `title`,
        // `initial_dir` and `def_ext` outlive this call.  The dialog reads and
        // writes only within the buffers we provided.  Called on the UI thread
        // (required for modal dialogs).
        let ok = unsafe {
            if save {
                GetSaveFileNameW(&mut ofn)
            } else {
                GetOpenFileNameW(&mut ofn)
            }
        };

        if ok.as_bool() {
            Choice::from(path_from_buf(&buf))
        } else {
            Choice::Cancelled
        }
    }

    /// Show a message box; `true` if the user pressed Yes.
    fn message_box(&self, title: &str, message: &str, style: MESSAGEBOX_STYLE) -> bool {
        let title = wide(title);
        let message = wide(message);
        // SAFETY: title and message are null-terminated UTF-16 strings that
        // remain allocated for the duration of the MessageBoxW call; owner is
        // the main window (or null).
        let pressed = unsafe {
            MessageBoxW(self.owner, PCWSTR(message.as_ptr()), PCWSTR(title.as_ptr()), style)
        };
        pressed == IDYES
    }
}

impl DialogProvider for Win32Dialogs {
    fn confirm(&mut self, title: &str, message: &str) -> Answer {
        if self.message_box(title, message, MB_YESNO | MB_ICONQUESTION) {
            Answer::Yes
        } else {
            Answer::No
        }
    }

    fn open_file(&mut self, request: &FileRequest) -> Choice<PathBuf> {
        self.file_dialog(request, false)
    }

    fn save_file(&mut self, request: &FileRequest) -> Choice<PathBuf> {
        self.file_dialog(request, true)
    }

    fn choose_font(&mut self, current: &FontDescriptor) -> Choice<FontDescriptor> {
        let mut lf = text_area::log_font(current, dpi::get_for_window(self.owner));
        let mut cf = CHOOSEFONTW {
            lStructSize: std::mem::size_of::<CHOOSEFONTW>() as u32,
            hwndOwner: self.owner,
            lpLogFont: &mut lf,
            Flags: CF_SCREENFONTS | CF_INITTOLOGFONTSTRUCT | CF_EFFECTS,
            ..Default::default()
        };

        // SAFETY: `cf` is fully initialised and `lf` outlives the call; the
        // dialog writes the chosen font back into `lf` and `cf.iPointSize`.
        let ok = unsafe { ChooseFontW(&mut cf) };

        if ok.as_bool() {
            Choice::Chosen(text_area::font_from_log_font(&lf, cf.iPointSize))
        } else {
            Choice::Cancelled
        }
    }

    fn choose_color(&mut self, current: Rgb) -> Choice<Rgb> {
        let mut cc = CHOOSECOLORW {
            lStructSize: std::mem::size_of::<CHOOSECOLORW>() as u32,
            hwndOwner: self.owner,
            rgbResult: colorref(current),
            lpCustColors: self.custom_colors.as_mut_ptr(),
            Flags: CC_RGBINIT | CC_FULLOPEN,
            ..Default::default()
        };

        // SAFETY: `cc` is fully initialised; lpCustColors points at sixteen
        // COLORREFs owned by `self`, which outlives the call.
        let ok = unsafe { ChooseColorW(&mut cc) };

        if ok.as_bool() {
            Choice::Chosen(rgb(cc.rgbResult))
        } else {
            Choice::Cancelled
        }
    }

    fn show_error(&mut self, message: &str) {
        self.message_box(APP_TITLE, message, MB_OK | MB_ICONERROR);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Null-separated filter pairs ending with a double null:
/// `"Display\0*.ext\0Display2\0*.ext2\0\0"`.
fn filter_string(filters: &[FileFilter]) -> Vec<u16> {
    let mut out = String::new();
    for f in filters {
        out.push_str(f.name);
        out.push('\0');
        out.push_str(f.pattern);
        out.push('\0');
    }
    out.push('\0');
    out.encode_utf16().collect()
}

/// Convert a null-terminated UTF-16 buffer to a `PathBuf`; `None` if empty.
fn path_from_buf(buf: &[u16]) -> Option<PathBuf> {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    (len > 0).then(|| PathBuf::from(String::from_utf16_lossy(&buf[..len])))
}
