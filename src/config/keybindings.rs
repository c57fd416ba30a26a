//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings with option to override via configuration.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };

        // Row navigation
        bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::MoveDown);
        bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::MoveUp);
        bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::MoveDown);
        bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::MoveUp);
        bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
        bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::MoveToTop);
        bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::MoveToTop);
        bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::MoveToBottom);
        bind(KeyCode::End, KeyModifiers::NONE, KeyAction::MoveToBottom);

        // Selection
        bind(KeyCode::Char(' '), KeyModifiers::NONE, KeyAction::ToggleSelect);
        bind(KeyCode::Char('a'), KeyModifiers::NONE, KeyAction::SelectAllVisible);
        bind(KeyCode::Char('x'), KeyModifiers::NONE, KeyAction::DeselectAll);

        // Transfer
        bind(KeyCode::Char('s'), KeyModifiers::NONE, KeyAction::SendSelected);
        bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::SendHighlighted);

        // Filter
        bind(KeyCode::Char('/'), KeyModifiers::NONE, KeyAction::StartFilter);
        bind(KeyCode::Char('f'), KeyModifiers::CONTROL, KeyAction::StartFilter);
        bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::ClearFilter);

        // Paging
        bind(KeyCode::Char('n'), KeyModifiers::NONE, KeyAction::LoadMore);
        bind(KeyCode::Char(']'), KeyModifiers::NONE, KeyAction::NextPage);
        bind(KeyCode::Char('['), KeyModifiers::NONE, KeyAction::PrevPage);
        bind(KeyCode::Char('r'), KeyModifiers::NONE, KeyAction::Retry);

        // Links
        bind(KeyCode::Char('o'), KeyModifiers::NONE, KeyAction::OpenLink);

        // Application controls
        bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        bind(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::Help);

        Self { bindings }
    }
}
