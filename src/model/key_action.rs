//! Domain-level keyboard actions independent of key bindings.

use super::action::ActionName;

/// Abstract input fed to the controller.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Query editing
    /// Append a printable character to the query. Default: any printable key
    Insert(char),
    /// Remove the last character of the query. Default: Backspace/Ctrl+h
    DeleteChar,
    /// Remove the last word of the query. Default: Ctrl+w/Ctrl+Backspace
    DeleteWord,

    // Candidate navigation
    /// Move the highlight to the next candidate, wrapping. Default: Ctrl+n/↓
    NextCandidate,
    /// Move the highlight to the previous candidate, wrapping. Default: Ctrl+p/↑
    PrevCandidate,

    // Application
    /// End the run with the named action. Default: Enter, Tab, Esc, Ctrl+c, Ctrl+g
    Finish(ActionName),
}
