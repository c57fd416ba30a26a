//! Filter input handling (pure state transitions).
//!
//! FilterInput is a sum type for the filter field: either not being edited
//! (possibly holding an applied needle) or being edited with a cursor.
//! All functions are pure - no side effects, testable without TUI.

/// Filter input state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterInput {
    /// Not editing. `needle` may be empty (no filter).
    #[default]
    Idle,
    /// Not editing, filter applied.
    Applied { needle: String },
    /// User is typing. Filtering applies on every keystroke.
    Editing { needle: String, cursor: usize },
}

impl FilterInput {
    /// Current needle as typed (not lowercased). Empty when no filter.
    pub fn needle(&self) -> &str {
        match self {
            FilterInput::Idle => "",
            FilterInput::Applied { needle } | FilterInput::Editing { needle, .. } => needle,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, FilterInput::Editing { .. })
    }

    /// Start with a pre-applied needle (e.g. from the `--filter` flag).
    pub fn with_needle(needle: impl Into<String>) -> Self {
        let needle = needle.into();
        if needle.is_empty() {
            FilterInput::Idle
        } else {
            FilterInput::Applied { needle }
        }
    }
}

/// Byte offset of the `cursor`-th char.
fn byte_offset(s: &str, cursor: usize) -> usize {
    s.char_indices().nth(cursor).map(|(i, _)| i).unwrap_or(s.len())
}

/// Enter editing mode, keeping any applied needle with the cursor at its end.
pub fn activate(state: FilterInput) -> FilterInput {
    match state {
        FilterInput::Idle => FilterInput::Editing {
            needle: String::new(),
            cursor: 0,
        },
        FilterInput::Applied { needle } => {
            let cursor = needle.chars().count();
            FilterInput::Editing { needle, cursor }
        }
        editing @ FilterInput::Editing { .. } => editing,
    }
}

/// Insert a character at the cursor. No-op unless editing.
pub fn insert_char(state: FilterInput, ch: char) -> FilterInput {
    match state {
        FilterInput::Editing { mut needle, cursor } => {
            let at = byte_offset(&needle, cursor);
            needle.insert(at, ch);
            FilterInput::Editing {
                needle,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor. No-op unless editing.
pub fn backspace(state: FilterInput) -> FilterInput {
    match state {
        FilterInput::Editing { mut needle, cursor } if cursor > 0 => {
            let at = byte_offset(&needle, cursor - 1);
            needle.remove(at);
            FilterInput::Editing {
                needle,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Move cursor left by one position, saturating at 0.
pub fn cursor_left(state: FilterInput) -> FilterInput {
    match state {
        FilterInput::Editing { needle, cursor } => FilterInput::Editing {
            needle,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move cursor right by one position, saturating at the needle length.
pub fn cursor_right(state: FilterInput) -> FilterInput {
    match state {
        FilterInput::Editing { needle, cursor } => {
            let max = needle.chars().count();
            FilterInput::Editing {
                needle,
                cursor: (cursor + 1).min(max),
            }
        }
        other => other,
    }
}

/// Stop editing and keep the needle. An empty needle becomes Idle.
pub fn confirm(state: FilterInput) -> FilterInput {
    match state {
        FilterInput::Editing { needle, .. } => FilterInput::with_needle(needle),
        other => other,
    }
}

/// Drop the needle entirely.
pub fn clear(_state: FilterInput) -> FilterInput {
    FilterInput::Idle
}
