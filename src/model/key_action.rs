//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Row navigation
    /// Move the highlight up one row. Default: k/↑
    MoveUp,
    /// Move the highlight down one row. Scrolling onto the last row loads more. Default: j/↓
    MoveDown,
    /// Move the highlight up by the visible row count. Default: Page Up/Ctrl+u
    PageUp,
    /// Move the highlight down by the visible row count. Default: Page Down/Ctrl+d
    PageDown,
    /// Jump to the first row. Default: g/Home
    MoveToTop,
    /// Jump to the last row. Default: G/End
    MoveToBottom,

    // Selection
    /// Toggle selection of the highlighted row. Default: Space
    ToggleSelect,
    /// Replace the selection with every visible row. Default: a
    SelectAllVisible,
    /// Clear the selection. Default: x
    DeselectAll,

    // Transfer
    /// Open the transfer modal with every selected item. Default: s
    SendSelected,
    /// Open the transfer modal with only the highlighted item. Default: Enter
    SendHighlighted,

    // Filter
    /// Focus the collection filter input. Default: / or Ctrl+f
    StartFilter,
    /// Clear the filter and leave the input. Default: Esc
    ClearFilter,

    // Paging
    /// Load the next page (infinite scroll mode). Default: n
    LoadMore,
    /// Go to the next page, fetching it when needed (pagination mode). Default: ]
    NextPage,
    /// Go to the previous page (pagination mode). Default: [
    PrevPage,
    /// Re-run the request that last failed. Default: r
    Retry,

    // Links
    /// Open the primary marketplace link of the highlighted row. Default: o
    OpenLink,

    // Application
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether the action is a paging action that may issue a request.
    pub fn is_paging(self) -> bool {
        matches!(
            self,
            KeyAction::LoadMore | KeyAction::NextPage | KeyAction::PrevPage | KeyAction::Retry
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_actions_are_classified() {
        assert!(KeyAction::LoadMore.is_paging());
        assert!(KeyAction::Retry.is_paging());
        assert!(KeyAction::NextPage.is_paging());
        assert!(!KeyAction::ToggleSelect.is_paging());
        assert!(!KeyAction::Quit.is_paging());
    }

    #[test]
    fn actions_are_hashable_for_binding_maps() {
        let mut set = std::collections::HashSet::new();
        set.insert(KeyAction::MoveUp);
        set.insert(KeyAction::MoveUp);
        assert_eq!(set.len(), 1);
    }
}
