// ── Dialog provider seam ──────────────────────────────────────────────────────
//
// Everything modal that the shell asks of the host: file choice, font and
// colour choice, yes/no confirmation, error reports.  The Win32 frontend
// implements this with common dialogs; tests implement it with a script.

use std::path::PathBuf;

use crate::{
    config::FileFilter,
    style::{FontDescriptor, Rgb},
};

/// The result of a dialog that can be dismissed without choosing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Choice<T> {
    Chosen(T),
    Cancelled,
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Cancelled, Self::Chosen)
    }
}

/// The button pressed in a yes/no confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Answer {
    Yes,
    No,
}

/// What a file dialog should look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FileRequest {
    pub(crate) title: &'static str,
    /// Directory the dialog opens in.
    pub(crate) directory: &'static str,
    /// Filters offered, first one selected.
    pub(crate) filters: &'static [FileFilter],
}

/// Modal UI supplied by the host toolkit.
///
/// Every method blocks until the user dismisses the dialog.
pub(crate) trait DialogProvider {
    fn confirm(&mut self, title: &str, message: &str) -> Answer;

    /// Pick an existing file to read.
    fn open_file(&mut self, request: &FileRequest) -> Choice<PathBuf>;

    /// Pick a destination to write, possibly a new file.
    fn save_file(&mut self, request: &FileRequest) -> Choice<PathBuf>;

    /// Pick a font, starting from `current`.
    fn choose_font(&mut self, current: &FontDescriptor) -> Choice<FontDescriptor>;

    /// Pick a colour, starting from `current`.
    fn choose_color(&mut self, current: Rgb) -> Choice<Rgb>;

    /// Tell the user that an action failed.
    fn show_error(&mut self, message: &str);
}
