// ── Editor shell ──────────────────────────────────────────────────────────────
//
// The whole editor in platform-independent form: one text area, the current
// style, and a handler per menu action.  A single `EditorShell` is created on
// startup and owned by the window for its lifetime.  All mutations happen on
// the UI thread; there is no global mutable state.

pub(crate) mod dialogs;

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::{
    config::{DIALOG_ROOT, TEXT_FILTERS},
    document::{self, convert_eols, EolMode},
    error::Result,
    menu::Action,
    style::Style,
};

use dialogs::{Answer, Choice, DialogProvider, FileRequest};

// ── Dialog texts ──────────────────────────────────────────────────────────────

const NEW_TITLE: &str = "Create new file?";
const NEW_MESSAGE: &str = "You may not have saved your file";
const RESET_TITLE: &str = "Reset all styles?";
const RESET_MESSAGE: &str = "You cannot undo this";

pub(crate) const OPEN_REQUEST: FileRequest = FileRequest {
    title: "Open File",
    directory: DIALOG_ROOT,
    filters: TEXT_FILTERS,
};

pub(crate) const SAVE_REQUEST: FileRequest = FileRequest {
    title: "Save File",
    directory: DIALOG_ROOT,
    filters: TEXT_FILTERS,
};

// ── Text area seam ────────────────────────────────────────────────────────────

/// The editable, scrollable text region.
///
/// It holds the document buffer; the shell reads and replaces it wholesale.
pub(crate) trait TextArea {
    /// The line-break convention the control stores text in.
    fn line_ending(&self) -> EolMode;

    /// Current buffer contents.
    fn text(&self) -> String;

    /// Replace the buffer contents.
    fn set_text(&mut self, text: &str) -> Result<()>;

    /// Redraw with `style`.  On error the previous style stays in effect.
    fn apply_style(&mut self, style: &Style) -> Result<()>;
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// What a menu action ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Nothing to do (New on an empty buffer).
    Unchanged,
    /// The user backed out of a dialog.
    Cancelled,
    /// The buffer was emptied.
    Cleared,
    /// The buffer was replaced with the contents of this file.
    Opened(PathBuf),
    /// The buffer was written to this file.
    Saved(PathBuf),
    /// Font or background changed.
    Restyled,
    /// The window should close.
    Exit,
    /// The action failed and the user has been told.
    Failed,
}

// ── EditorShell ───────────────────────────────────────────────────────────────

pub(crate) struct EditorShell<D, T> {
    dialogs: D,
    text: T,
    style: Style,
    /// Line breaks used on disk by the file last opened.
    eol: EolMode,
}

impl<D: DialogProvider, T: TextArea> EditorShell<D, T> {
    /// Wrap an empty text area and draw it with the default style.
    pub(crate) fn new(dialogs: D, mut text: T) -> Result<Self> {
        let style = Style::default();
        text.apply_style(&style)?;
        let eol = text.line_ending();
        Ok(Self { dialogs, text, style, eol })
    }

    pub(crate) fn style(&self) -> &Style {
        &self.style
    }

    pub(crate) fn text_area(&self) -> &T {
        &self.text
    }

    #[cfg(test)]
    pub(crate) fn text_area_mut(&mut self) -> &mut T {
        &mut self.text
    }

    #[cfg(test)]
    pub(crate) fn dialogs(&self) -> &D {
        &self.dialogs
    }

    /// Redraw with the current style, e.g. after the window moved to a
    /// monitor with a different DPI.
    pub(crate) fn refresh_style(&mut self) -> Result<()> {
        self.text.apply_style(&self.style)
    }

    /// Run `action`; failures are reported through the dialog provider.
    pub(crate) fn handle(&mut self, action: Action) -> Outcome {
        debug!(?action, "menu action");
        match self.dispatch(action) {
            Ok(outcome) => {
                debug!(?action, ?outcome, "action finished");
                outcome
            }
            Err(e) => {
                warn!(?action, error = %e, "action failed");
                self.dialogs.show_error(&e.to_string());
                Outcome::Failed
            }
        }
    }

    /// Run `action` and return its outcome or its error.
    pub(crate) fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        match action {
            Action::New => self.new_file(),
            Action::Open => self.open_file(),
            Action::Save => self.save_file(),
            Action::Exit => Ok(Outcome::Exit),
            Action::Font => self.change_font(),
            Action::Background => self.change_background(),
            Action::Reset => self.reset_style(),
        }
    }

    // ── File menu ─────────────────────────────────────────────────────────────

    /// Empty the buffer, asking first if there is anything in it.
    ///
    /// Only emptiness is checked; a buffer that was just saved still prompts.
    fn new_file(&mut self) -> Result<Outcome> {
        if self.text.text().is_empty() {
            return Ok(Outcome::Unchanged);
        }
        if self.dialogs.confirm(NEW_TITLE, NEW_MESSAGE) == Answer::No {
            return Ok(Outcome::Cancelled);
        }
        self.text.set_text("")?;
        self.eol = self.text.line_ending();
        Ok(Outcome::Cleared)
    }

    fn open_file(&mut self) -> Result<Outcome> {
        let Choice::Chosen(path) = self.dialogs.open_file(&OPEN_REQUEST) else {
            return Ok(Outcome::Cancelled);
        };
        let content = document::read_text(&path)?;
        let native = self.text.line_ending();
        let eol = EolMode::detect(&content).unwrap_or(native);
        // Stray breaks of another kind must be normalised even when the
        // dominant convention already matches the control.
        self.text.set_text(&convert_eols(&content, native))?;
        self.eol = eol;
        info!(path = %path.display(), ?eol, "opened");
        Ok(Outcome::Opened(path))
    }

    fn save_file(&mut self) -> Result<Outcome> {
        let Choice::Chosen(path) = self.dialogs.save_file(&SAVE_REQUEST) else {
            return Ok(Outcome::Cancelled);
        };
        let text = self.text.text();
        if self.eol == self.text.line_ending() {
            document::write_text(&path, &text)?;
        } else {
            document::write_text(&path, &convert_eols(&text, self.eol))?;
        }
        info!(path = %path.display(), "saved");
        Ok(Outcome::Saved(path))
    }

    // ── Style menu ────────────────────────────────────────────────────────────

    fn change_font(&mut self) -> Result<Outcome> {
        let Choice::Chosen(font) = self.dialogs.choose_font(&self.style.font) else {
            return Ok(Outcome::Cancelled);
        };
        self.restyle(Style { font, ..self.style.clone() })
    }

    fn change_background(&mut self) -> Result<Outcome> {
        let Choice::Chosen(background) = self.dialogs.choose_color(self.style.background) else {
            return Ok(Outcome::Cancelled);
        };
        self.restyle(Style { background, ..self.style.clone() })
    }

    fn reset_style(&mut self) -> Result<Outcome> {
        if self.dialogs.confirm(RESET_TITLE, RESET_MESSAGE) == Answer::No {
            return Ok(Outcome::Cancelled);
        }
        self.restyle(Style::default())
    }

    fn restyle(&mut self, style: Style) -> Result<Outcome> {
        self.text.apply_style(&style)?;
        info!(font = %style.font, background = %style.background, "restyled");
        self.style = style;
        Ok(Outcome::Restyled)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests;
