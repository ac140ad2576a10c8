//! Terminal actions and the selection they produce.

use std::fmt;

/// Name of the key that ended the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionName {
    /// Enter, Ctrl-J or Ctrl-M.
    Enter,
    /// Tab, when it is allowed to finish.
    Tab,
    /// Escape.
    Esc,
    /// Ctrl-C.
    CtrlC,
    /// Ctrl-G.
    CtrlG,
}

impl ActionName {
    /// Name as printed in `--action` mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Tab => "tab",
            Self::Esc => "esc",
            Self::CtrlC => "ctrl-c",
            Self::CtrlG => "ctrl-g",
        }
    }

    /// Whether this action cancels the selection.
    pub fn is_abort(self) -> bool {
        matches!(self, Self::Esc | Self::CtrlC | Self::CtrlG)
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal action: which key ended the run and whether it aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    /// True for Esc, Ctrl-C and Ctrl-G.
    pub abort: bool,
    /// Key that ended the run.
    pub name: ActionName,
}

impl Action {
    /// Accept the highlighted line.
    pub const ENTER: Self = Self::new(ActionName::Enter);
    /// Accept via Tab.
    pub const TAB: Self = Self::new(ActionName::Tab);
    /// Abort via Escape.
    pub const ESC: Self = Self::new(ActionName::Esc);
    /// Abort via Ctrl-C.
    pub const CTRL_C: Self = Self::new(ActionName::CtrlC);
    /// Abort via Ctrl-G.
    pub const CTRL_G: Self = Self::new(ActionName::CtrlG);

    /// Action for `name`, with the abort flag implied by the name.
    pub const fn new(name: ActionName) -> Self {
        let abort = matches!(name, ActionName::Esc | ActionName::CtrlC | ActionName::CtrlG);
        Self { abort, name }
    }
}

impl From<ActionName> for Action {
    fn from(name: ActionName) -> Self {
        Self::new(name)
    }
}

/// Result of an interactive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// How the run ended.
    pub action: Action,
    /// Selected line, or the raw query when nothing matched.
    pub text: String,
}

impl Selection {
    /// Selection ended by `action` with `text`.
    pub fn new(action: Action, text: impl Into<String>) -> Self {
        Self {
            action,
            text: text.into(),
        }
    }

    /// Whether the run was cancelled.
    pub fn is_abort(&self) -> bool {
        self.action.abort
    }
}
