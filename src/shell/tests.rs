use std::{collections::VecDeque, fs, path::PathBuf};

use super::*;
use crate::{
    error::NotepadError,
    style::{FontDescriptor, Rgb},
};

// ── Doubles ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Confirm(String),
    Open(FileRequest),
    Save(FileRequest),
    Font(FontDescriptor),
    Color(Rgb),
    Error(String),
}

/// Plays back pre-recorded dialog results and records every dialog shown.
/// Showing a dialog with nothing scripted for it fails the test.
#[derive(Default)]
struct ScriptedDialogs {
    answers: VecDeque<Answer>,
    opens: VecDeque<Choice<PathBuf>>,
    saves: VecDeque<Choice<PathBuf>>,
    fonts: VecDeque<Choice<FontDescriptor>>,
    colors: VecDeque<Choice<Rgb>>,
    calls: Vec<Call>,
}

impl ScriptedDialogs {
    fn answer(mut self, a: Answer) -> Self {
        self.answers.push_back(a);
        self
    }

    fn open(mut self, c: Choice<PathBuf>) -> Self {
        self.opens.push_back(c);
        self
    }

    fn save(mut self, c: Choice<PathBuf>) -> Self {
        self.saves.push_back(c);
        self
    }

    fn font(mut self, c: Choice<FontDescriptor>) -> Self {
        self.fonts.push_back(c);
        self
    }

    fn color(mut self, c: Choice<Rgb>) -> Self {
        self.colors.push_back(c);
        self
    }
}

impl DialogProvider for ScriptedDialogs {
    fn confirm(&mut self, title: &str, _message: &str) -> Answer {
        self.calls.push(Call::Confirm(title.to_owned()));
        self.answers.pop_front().expect("unexpected confirmation dialog")
    }

    fn open_file(&mut self, request: &FileRequest) -> Choice<PathBuf> {
        self.calls.push(Call::Open(*request));
        self.opens.pop_front().expect("unexpected open dialog")
    }

    fn save_file(&mut self, request: &FileRequest) -> Choice<PathBuf> {
        self.calls.push(Call::Save(*request));
        self.saves.pop_front().expect("unexpected save dialog")
    }

    fn choose_font(&mut self, current: &FontDescriptor) -> Choice<FontDescriptor> {
        self.calls.push(Call::Font(current.clone()));
        self.fonts.pop_front().expect("unexpected font dialog")
    }

    fn choose_color(&mut self, current: Rgb) -> Choice<Rgb> {
        self.calls.push(Call::Color(current));
        self.colors.pop_front().expect("unexpected colour dialog")
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(Call::Error(message.to_owned()));
    }
}

/// A text area that is just a string.
struct MemoryTextArea {
    text: String,
    eol: EolMode,
    drawn: Option<Style>,
    reject_styles: bool,
}

impl MemoryTextArea {
    fn new(eol: EolMode) -> Self {
        Self { text: String::new(), eol, drawn: None, reject_styles: false }
    }
}

impl TextArea for MemoryTextArea {
    fn line_ending(&self) -> EolMode {
        self.eol
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = text.to_owned();
        Ok(())
    }

    fn apply_style(&mut self, style: &Style) -> Result<()> {
        if self.reject_styles {
            return Err(NotepadError::Win32 { function: "CreateFontIndirectW", code: 0 });
        }
        self.drawn = Some(style.clone());
        Ok(())
    }
}

type Shell = EditorShell<ScriptedDialogs, MemoryTextArea>;

fn shell_with(dialogs: ScriptedDialogs, text: &str) -> Shell {
    let mut shell = EditorShell::new(dialogs, MemoryTextArea::new(EolMode::Lf)).unwrap();
    shell.text_area_mut().text = text.to_owned();
    shell
}

fn buffer(shell: &Shell) -> &str {
    &shell.text_area().text
}

fn calls(shell: &Shell) -> &[Call] {
    &shell.dialogs().calls
}

fn blue() -> Rgb {
    Rgb::new(0, 0, 255)
}

fn mono() -> FontDescriptor {
    "Consolas,14,-1,5,75,0,0,0,0,0".parse().unwrap()
}

// ── Startup ───────────────────────────────────────────────────────────────────

#[test]
fn new_shell_draws_default_style() {
    let shell = shell_with(ScriptedDialogs::default(), "");
    assert_eq!(shell.style(), &Style::default());
    assert_eq!(shell.text_area().drawn, Some(Style::default()));
}

// ── New ───────────────────────────────────────────────────────────────────────

#[test]
fn new_on_empty_buffer_shows_no_dialog() {
    let mut shell = shell_with(ScriptedDialogs::default(), "");
    assert_eq!(shell.handle(Action::New), Outcome::Unchanged);
    assert_eq!(buffer(&shell), "");
    assert!(calls(&shell).is_empty());
}

#[test]
fn new_confirmed_clears_buffer() {
    let mut shell = shell_with(ScriptedDialogs::default().answer(Answer::Yes), "draft");
    assert_eq!(shell.handle(Action::New), Outcome::Cleared);
    assert_eq!(buffer(&shell), "");
    assert_eq!(calls(&shell), [Call::Confirm(NEW_TITLE.to_owned())]);
}

#[test]
fn new_declined_keeps_buffer() {
    let mut shell = shell_with(ScriptedDialogs::default().answer(Answer::No), "x");
    assert_eq!(shell.handle(Action::New), Outcome::Cancelled);
    assert_eq!(buffer(&shell), "x");
    assert_eq!(calls(&shell).len(), 1);
}

#[test]
fn new_prompts_even_right_after_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.txt");
    let dialogs = ScriptedDialogs::default()
        .save(Choice::Chosen(path))
        .answer(Answer::No);
    let mut shell = shell_with(dialogs, "kept");

    assert!(matches!(shell.handle(Action::Save), Outcome::Saved(_)));
    assert_eq!(shell.handle(Action::New), Outcome::Cancelled);
    assert_eq!(buffer(&shell), "kept");
}

#[test]
fn new_leaves_style_alone() {
    let dialogs = ScriptedDialogs::default().color(Choice::Chosen(blue())).answer(Answer::Yes);
    let mut shell = shell_with(dialogs, "text");
    shell.handle(Action::Background);
    shell.handle(Action::New);
    assert_eq!(shell.style().background, blue());
}

// ── Open / Save ───────────────────────────────────────────────────────────────

#[test]
fn save_then_open_in_fresh_shell_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");

    let mut writer = shell_with(ScriptedDialogs::default().save(Choice::Chosen(path.clone())), "hello world");
    assert_eq!(writer.handle(Action::Save), Outcome::Saved(path.clone()));
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");

    let mut reader = shell_with(ScriptedDialogs::default().open(Choice::Chosen(path.clone())), "");
    assert_eq!(reader.handle(Action::Open), Outcome::Opened(path));
    assert_eq!(buffer(&reader), "hello world");
}

#[test]
fn multiline_text_round_trips_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.txt");
    let content = "first line\n\n  indented ünïcode\nlast";

    let mut writer = shell_with(ScriptedDialogs::default().save(Choice::Chosen(path.clone())), content);
    writer.handle(Action::Save);

    let mut reader = shell_with(ScriptedDialogs::default().open(Choice::Chosen(path.clone())), "");
    reader.handle(Action::Open);
    assert_eq!(buffer(&reader), content);
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn open_replaces_existing_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("b.txt");
    fs::write(&path, "from disk").unwrap();

    let mut shell = shell_with(ScriptedDialogs::default().open(Choice::Chosen(path)), "unsaved work");
    shell.handle(Action::Open);
    assert_eq!(buffer(&shell), "from disk");
}

#[test]
fn file_dialogs_filter_to_txt_from_root() {
    let dialogs = ScriptedDialogs::default()
        .open(Choice::Cancelled)
        .save(Choice::Cancelled);
    let mut shell = shell_with(dialogs, "");
    shell.handle(Action::Open);
    shell.handle(Action::Save);

    for call in calls(&shell) {
        let request = match call {
            Call::Open(r) | Call::Save(r) => r,
            other => panic!("unexpected dialog {other:?}"),
        };
        assert_eq!(request.directory, "C:/");
        assert_eq!(request.filters[0].pattern, "*.txt");
    }
}

#[test]
fn open_cancelled_leaves_buffer_and_style() {
    let mut shell = shell_with(ScriptedDialogs::default().open(Choice::Cancelled), "keep me");
    assert_eq!(shell.handle(Action::Open), Outcome::Cancelled);
    assert_eq!(buffer(&shell), "keep me");
    assert_eq!(shell.style(), &Style::default());
}

#[test]
fn save_cancelled_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with(ScriptedDialogs::default().save(Choice::Cancelled), "unsaved");
    assert_eq!(shell.handle(Action::Save), Outcome::Cancelled);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    assert_eq!(buffer(&shell), "unsaved");    assert_eq!(shell.style(), &Style::default());
}

#[test]
fn open_missing_file_reports_error_and_keeps_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");

    let mut shell = shell_with(ScriptedDialogs::default().open(Choice::Chosen(path)), "still here");
    assert_eq!(shell.handle(Action::Open), Outcome::Failed);
    assert_eq!(buffer(&shell), "still here");
    assert!(matches!(calls(&shell).last(), Some(Call::Error(msg)) if msg.contains("missing.txt")));
}

#[test]
fn open_binary_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.txt");
    fs::write(&path, [0x89, b'P', b'N', b'G', 0xFF, 0xFE]).unwrap();

    let mut shell = shell_with(ScriptedDialogs::default().open(Choice::Chosen(path)), "");
    assert!(matches!(shell.dispatch(Action::Open), Err(NotepadError::NotText { .. })));
    assert_eq!(buffer(&shell), "");
}

#[test]
fn save_failure_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("a.txt");

    let mut shell = shell_with(ScriptedDialogs::default().save(Choice::Chosen(path)), "text");
    assert_eq!(shell.handle(Action::Save), Outcome::Failed);
    assert!(matches!(calls(&shell).last(), Some(Call::Error(_))));
    assert_eq!(buffer(&shell), "text");
}

#[test]
fn lf_file_is_shown_as_crlf_and_saved_as_lf() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("unix.txt");
    let dst = dir.path().join("copy.txt");
    fs::write(&src, "one\ntwo\n").unwrap();

    let dialogs = ScriptedDialogs::default()
        .open(Choice::Chosen(src))
        .save(Choice::Chosen(dst.clone()));
    let mut shell = EditorShell::new(dialogs, MemoryTextArea::new(EolMode::Crlf)).unwrap();

    shell.handle(Action::Open);
    assert_eq!(shell.text_area().text, "one\r\ntwo\r\n");

    shell.text_area_mut().text.push_str("three\r\n");
    shell.handle(Action::Save);
    assert_eq!(fs::read_to_string(&dst).unwrap(), "one\ntwo\nthree\n");
}

#[test]
fn stray_breaks_in_crlf_file_are_shown_as_crlf() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("mixed.txt");
    let dst = dir.path().join("copy.txt");
    fs::write(&src, "a\r\nb\r\nc\nd").unwrap();

    let dialogs = ScriptedDialogs::default()
        .open(Choice::Chosen(src))
        .save(Choice::Chosen(dst.clone()));
    let mut shell = EditorShell::new(dialogs, MemoryTextArea::new(EolMode::Crlf)).unwrap();

    shell.handle(Action::Open);
    assert_eq!(shell.text_area().text, "a\r\nb\r\nc\r\nd");

    shell.handle(Action::Save);
    assert_eq!(fs::read_to_string(&dst).unwrap(), "a\r\nb\r\nc\r\nd");
}

#[test]
fn stray_breaks_in_lf_file_are_shown_as_crlf() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("mixed.txt");
    fs::write(&src, "a\nb\nc\r\nd").unwrap();

    let dialogs = ScriptedDialogs::default().open(Choice::Chosen(src));
    let mut shell = EditorShell::new(dialogs, MemoryTextArea::new(EolMode::Crlf)).unwrap();

    shell.handle(Action::Open);
    assert_eq!(shell.text_area().text, "a\r\nb\r\nc\r\nd");
}

#[test]
fn new_forgets_line_endings_of_last_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("unix.txt");
    let dst = dir.path().join("fresh.txt");
    fs::write(&src, "a\nb\n").unwrap();

    let dialogs = ScriptedDialogs::default()
        .open(Choice::Chosen(src))
        .answer(Answer::Yes)
        .save(Choice::Chosen(dst.clone()));
    let mut shell = EditorShell::new(dialogs, MemoryTextArea::new(EolMode::Crlf)).unwrap();

    shell.handle(Action::Open);
    shell.handle(Action::New);
    shell.text_area_mut().text = "x\r\ny".to_owned();
    shell.handle(Action::Save);
    assert_eq!(fs::read_to_string(&dst).unwrap(), "x\r\ny");
}

// ── Exit ──────────────────────────────────────────────────────────────────────

#[test]
fn exit_asks_nothing() {
    let mut shell = shell_with(ScriptedDialogs::default(), "unsaved");
    assert_eq!(shell.handle(Action::Exit), Outcome::Exit);
    assert!(calls(&shell).is_empty());
}

// ── Font / Background ─────────────────────────────────────────────────────────

#[test]
fn font_dialog_is_seeded_and_choice_applied() {
    let mut shell = shell_with(ScriptedDialogs::default().font(Choice::Chosen(mono())), "abc");
    assert_eq!(shell.handle(Action::Font), Outcome::Restyled);
    assert_eq!(calls(&shell), [Call::Font(FontDescriptor::default())]);
    assert_eq!(shell.style().font, mono());
    assert_eq!(shell.text_area().drawn.as_ref().map(|s| &s.font), Some(&mono()));
    assert_eq!(buffer(&shell), "abc");
}

#[test]
fn font_cancelled_leaves_style() {
    let mut shell = shell_with(ScriptedDialogs::default().font(Choice::Cancelled), "abc");
    assert_eq!(shell.handle(Action::Font), Outcome::Cancelled);
    assert_eq!(shell.style(), &Style::default());    assert_eq!(buffer(&shell), "abc");
}

#[test]
fn background_choice_applied_and_font_kept() {
    let dialogs = ScriptedDialogs::default()
        .font(Choice::Chosen(mono()))
        .color(Choice::Chosen(blue()));
    let mut shell = shell_with(dialogs, "");
    shell.handle(Action::Font);
    assert_eq!(shell.handle(Action::Background), Outcome::Restyled);
    assert_eq!(shell.style().background, blue());
    assert_eq!(shell.style().font, mono());
    assert_eq!(calls(&shell).last(), Some(&Call::Color(Rgb::WHITE)));
}

#[test]
fn background_cancelled_leaves_style() {
    let mut shell = shell_with(ScriptedDialogs::default().color(Choice::Cancelled), "abc");
    assert_eq!(shell.handle(Action::Background), Outcome::Cancelled);
    assert_eq!(shell.style().background, Rgb::WHITE);
    assert_eq!(buffer(&shell), "abc");
}

#[test]
fn failed_restyle_keeps_previous_style() {
    let mut shell = shell_with(ScriptedDialogs::default().font(Choice::Chosen(mono())), "");
    shell.text_area_mut().reject_styles = true;
    assert_eq!(shell.handle(Action::Font), Outcome::Failed);
    assert_eq!(shell.style(), &Style::default());
    assert!(matches!(calls(&shell).last(), Some(Call::Error(_))));
}

#[test]
fn refresh_redraws_current_style() {
    let mut shell = shell_with(ScriptedDialogs::default().color(Choice::Chosen(blue())), "");
    shell.handle(Action::Background);
    shell.text_area_mut().drawn = None;
    shell.refresh_style().unwrap();
    assert_eq!(shell.text_area().drawn.as_ref().map(|s| s.background), Some(blue()));
}

// ── Reset ─────────────────────────────────────────────────────────────────────

#[test]
fn reset_confirmed_restores_defaults_and_keeps_buffer() {
    let dialogs = ScriptedDialogs::default()
        .font(Choice::Chosen(mono()))
        .color(Choice::Chosen(blue()))
        .answer(Answer::Yes);
    let mut shell = shell_with(dialogs, "content");
    shell.handle(Action::Font);
    shell.handle(Action::Background);

    assert_eq!(shell.handle(Action::Reset), Outcome::Restyled);
    assert_eq!(shell.style(), &Style::default());
    assert_eq!(shell.text_area().drawn, Some(Style::default()));
    assert_eq!(buffer(&shell), "content");
    assert_eq!(calls(&shell).last(), Some(&Call::Confirm(RESET_TITLE.to_owned())));
}

#[test]
fn reset_declined_keeps_style() {
    let dialogs = ScriptedDialogs::default()
        .color(Choice::Chosen(blue()))
        .answer(Answer::No);
    let mut shell = shell_with(dialogs, "");
    shell.handle(Action::Background);
    assert_eq!(shell.handle(Action::Reset), Outcome::Cancelled);
    assert_eq!(shell.style().background, blue());
}

#[test]
fn reset_asks_even_when_style_is_default() {
    let mut shell = shell_with(ScriptedDialogs::default().answer(Answer::No), "");
    shell.handle(Action::Reset);
    assert_eq!(calls(&shell), [Call::Confirm(RESET_TITLE.to_owned())]);
}

// ── Choice ────────────────────────────────────────────────────────────────────

#[test]
fn choice_from_option() {
    assert_eq!(Choice::from(Some(3)), Choice::Chosen(3));
    assert_eq!(Choice::<u8>::from(None), Choice::Cancelled);
}
