// ── Plain-text files on disk ──────────────────────────────────────────────────
//
// Whole-file reads and writes for the single document, plus the line-ending
// bookkeeping that lets the native edit control (which only understands CRLF)
// hand back exactly what was read.
// No `unsafe`; pure safe Rust + std::fs.

use std::{fs, path::Path};

use tracing::debug;

use crate::error::{NotepadError, Result};

// ── EOL mode ──────────────────────────────────────────────────────────────────

/// The end-of-line convention used by the document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EolMode {
    /// Windows-style `\r\n`.
    Crlf,
    /// Unix-style `\n`.
    Lf,
    /// Old Mac-style `\r`.
    Cr,
}

impl EolMode {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
            Self::Cr => "\r",
        }
    }

    /// Detect the dominant EOL style in `text`.
    ///
    /// Counts `\r\n`, lone `\r` and lone `\n` and returns whichever appears
    /// most; ties favour CRLF, then LF.  `None` when `text` has no line breaks.
    pub(crate) fn detect(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    crlf += 1;
                    i += 2;
                }
                b'\r' => {
                    cr += 1;
                    i += 1;
                }
                b'\n' => {
                    lf += 1;
                    i += 1;
                }
                _ => i += 1,
            }
        }
        if crlf + lf + cr == 0 {
            None
        } else if crlf >= lf && crlf >= cr {
            Some(Self::Crlf)
        } else if lf >= cr {
            Some(Self::Lf)
        } else {
            Some(Self::Cr)
        }
    }
}

/// Rewrite every line break in `text` (`\r\n`, `\r` or `\n`) as `eol`.
pub(crate) fn convert_eols(text: &str, eol: EolMode) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(eol.as_str());
            }
            '\n' => out.push_str(eol.as_str()),
            _ => out.push(c),
        }
    }
    out
}

// ── Read / write ──────────────────────────────────────────────────────────────

/// Read the whole file at `path` as UTF-8 text.
///
/// A leading UTF-8 BOM is stripped.  Any other non-UTF-8 content is rejected
/// rather than decoded lossily.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| NotepadError::Read {
        path: path.to_owned(),
        source,
    })?;
    let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes[..]);
    let text = std::str::from_utf8(body)
        .map_err(|_| NotepadError::NotText { path: path.to_owned() })?
        .to_owned();
    debug!(path = %path.display(), bytes = bytes.len(), "read file");
    Ok(text)
}

/// Write `text` to `path`, creating or truncating the file.
pub(crate) fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| NotepadError::Write {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "wrote file");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
