// ── Menu model ────────────────────────────────────────────────────────────────
//
// The closed set of user actions and where each one lives in the menu bar.
// Pure Rust; `platform::win32::window` builds the HMENU and accelerator table
// from `Action::ALL`.

/// A top-level drop-down menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Menu {
    File,
    Style,
}

impl Menu {
    pub(crate) const ALL: [Self; 2] = [Self::File, Self::Style];

    /// Label with `&` marking the mnemonic.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::File => "&File",
            Self::Style => "&Style",
        }
    }
}

/// A keyboard shortcut bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shortcut {
    /// Ctrl plus an upper-case ASCII letter.
    Ctrl(char),
    /// Handled by the window manager itself; listed for display only.
    AltF4,
}

impl Shortcut {
    pub(crate) fn display(self) -> String {
        match self {
            Self::Ctrl(key) => format!("Ctrl+{key}"),
            Self::AltF4 => "Alt+F4".to_owned(),
        }
    }
}

/// Every action reachable from the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    New,
    Open,
    Save,
    Exit,
    Font,
    Background,
    Reset,
}

impl Action {
    /// Menu order.
    pub(crate) const ALL: [Self; 7] = [
        Self::New,
        Self::Open,
        Self::Save,
        Self::Exit,
        Self::Font,
        Self::Background,
        Self::Reset,
    ];

    pub(crate) fn menu(self) -> Menu {
        match self {
            Self::New | Self::Open | Self::Save | Self::Exit => Menu::File,
            Self::Font | Self::Background | Self::Reset => Menu::Style,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::New => "&New",
            Self::Open => "&Open…",
            Self::Save => "&Save…",
            Self::Exit => "E&xit",
            Self::Font => "&Font…",
            Self::Background => "&Background…",
            Self::Reset => "&Reset",
        }
    }

    pub(crate) fn shortcut(self) -> Shortcut {
        match self {
            Self::New => Shortcut::Ctrl('N'),
            Self::Open => Shortcut::Ctrl('O'),
            Self::Save => Shortcut::Ctrl('S'),
            Self::Exit => Shortcut::AltF4,
            Self::Font => Shortcut::Ctrl('F'),
            Self::Background => Shortcut::Ctrl('B'),
            Self::Reset => Shortcut::Ctrl('R'),
        }
    }

    /// Menu item text, with the shortcut right-aligned after a tab.
    pub(crate) fn menu_text(self) -> String {
        format!("{}\t{}", self.label(), self.shortcut().display())
    }

    /// The `WM_COMMAND` identifier for this action.
    pub(crate) fn command_id(self) -> u16 {
        match self {
            Self::New => 1001,
            Self::Open => 1002,
            Self::Save => 1003,
            Self::Exit => 1004,
            Self::Font => 2001,
            Self::Background => 2002,
            Self::Reset => 2003,
        }
    }

    /// Inverse of `command_id`; `None` for ids that are not ours.
    pub(crate) fn from_command_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.command_id() == id)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
