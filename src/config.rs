// ── Fixed configuration ───────────────────────────────────────────────────────
//
// The editor reads no config file and no environment.  Everything tunable
// lives here as a compile-time constant.

/// Title bar text.
pub(crate) const APP_TITLE: &str = "Notepad";

/// Initial window position and size, in pixels at 96 DPI.
pub(crate) const WINDOW_X: i32 = 650;
pub(crate) const WINDOW_Y: i32 = 250;
pub(crate) const WINDOW_WIDTH: i32 = 600;
pub(crate) const WINDOW_HEIGHT: i32 = 500;

/// Blank space between the text area's left edge and the text, at 96 DPI.
pub(crate) const TEXT_LEFT_PADDING: i32 = 5;

/// Directory the open and save dialogs start in.
pub(crate) const DIALOG_ROOT: &str = "C:/";

/// A display name plus glob pattern, as listed in a file dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FileFilter {
    pub(crate) name: &'static str,
    pub(crate) pattern: &'static str,
}

/// Filters offered by the open and save dialogs; the first is selected.
pub(crate) const TEXT_FILTERS: &[FileFilter] = &[
    FileFilter { name: "Text File (*.txt)", pattern: "*.txt" },
    FileFilter { name: "All Files (*.*)", pattern: "*.*" },
];

/// Extension appended by the save dialog when the user types none.
pub(crate) const DEFAULT_EXTENSION: &str = "txt";
