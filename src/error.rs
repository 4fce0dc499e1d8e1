// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations return `error::Result<T>`.  No panics in production
// paths; errors surface as user-facing dialogs (see
// `DialogProvider::show_error` and `platform::win32::window::show_error_dialog`).

use std::path::PathBuf;

use thiserror::Error;

/// Every error that the editor can produce.
#[derive(Debug, Error)]
pub enum NotepadError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// Reading the chosen file failed.
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the chosen file failed.
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not plain UTF-8 text.
    #[error("{} is not a UTF-8 text file", path.display())]
    NotText { path: PathBuf },

    /// No window frontend exists for the target OS.
    #[error("no window frontend is available for {0}")]
    UnsupportedPlatform(&'static str),
}

// Convert a windows-crate error (HRESULT) directly into a NotepadError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for NotepadError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NotepadError>;
