//! Keyboard bindings configuration.

use crate::model::{ActionName, KeyAction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides readline/emacs-style defaults. Printable characters that have no
/// explicit binding fall through to [`KeyAction::Insert`].
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the explicit binding for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Translate a terminal key event into an action.
    ///
    /// Only press events are considered. Release and repeat events, and keys
    /// with no meaning to the selector, yield `None`.
    pub fn translate(&self, key: KeyEvent) -> Option<KeyAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        // Drop kind/state so lookups match the bindings table.
        let normalized = KeyEvent::new(key.code, key.modifiers);
        if let Some(action) = self.get(normalized) {
            return Some(action);
        }

        match key.code {
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                Some(KeyAction::Insert(c))
            }
            _ => None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Query editing
        bindings.insert(
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            KeyAction::DeleteChar,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL),
            KeyAction::DeleteChar,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
            KeyAction::DeleteWord,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::CONTROL),
            KeyAction::DeleteWord,
        );

        // Candidate navigation
        bindings.insert(
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
            KeyAction::NextCandidate,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyAction::NextCandidate,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL),
            KeyAction::PrevCandidate,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            KeyAction::PrevCandidate,
        );

        // Terminal actions
        for key in [
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL),
            KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL),
        ] {
            bindings.insert(key, KeyAction::Finish(ActionName::Enter));
        }
        bindings.insert(
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            KeyAction::Finish(ActionName::Tab),
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyAction::Finish(ActionName::Esc),
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Finish(ActionName::CtrlC),
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL),
            KeyAction::Finish(ActionName::CtrlG),
        );

        Self { bindings }
    }
}
