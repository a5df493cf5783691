//! Transient per-row state of the conversation list.
//!
//! Renaming and delete confirmation are tracked per conversation and may be
//! active on several rows at once. The contextual menu is global: at most one
//! row has it open.

use std::collections::BTreeMap;

use crate::ConversationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    Idle,
    MenuOpen,
    Renaming { draft: String },
    ConfirmingDelete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ItemMode {
    Renaming { draft: String },
    ConfirmingDelete,
}

/// Result of activating a row's menu button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MenuToggle {
    Opened { previous: Option<ConversationId> },
    Closed,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListUiState {
    open_menu: Option<ConversationId>,
    modes: BTreeMap<ConversationId, ItemMode>,
}

impl ListUiState {
    pub fn item_state(&self, id: &str) -> ItemState {
        match self.modes.get(id) {
            Some(ItemMode::Renaming { draft }) => ItemState::Renaming {
                draft: draft.clone(),
            },
            Some(ItemMode::ConfirmingDelete) => ItemState::ConfirmingDelete,
            None if self.open_menu.as_deref() == Some(id) => ItemState::MenuOpen,
            None => ItemState::Idle,
        }
    }

    pub fn open_menu(&self) -> Option<&ConversationId> {
        self.open_menu.as_ref()
    }

    /// Row clicks are swallowed by the inline rename input and the delete
    /// confirmation controls.
    pub fn blocks_selection(&self, id: &str) -> bool {
        self.modes.contains_key(id)
    }

    pub(crate) fn toggle_menu(&mut self, id: &str) -> MenuToggle {
        if self.modes.contains_key(id) {
            return MenuToggle::Ignored;
        }
        if self.open_menu.as_deref() == Some(id) {
            self.open_menu = None;
            return MenuToggle::Closed;
        }
        let previous = self.open_menu.replace(id.to_owned());
        MenuToggle::Opened { previous }
    }

    /// Closes whichever menu is open. Returns true if one was.
    pub(crate) fn close_menu(&mut self) -> bool {
        self.open_menu.take().is_some()
    }

    fn close_menu_of(&mut self, id: &str) -> bool {
        if self.open_menu.as_deref() == Some(id) {
            self.open_menu = None;
            true
        } else {
            false
        }
    }

    /// Moves a row with an open menu into renaming. Returns false if the
    /// row's menu was not open.
    pub(crate) fn start_rename(&mut self, id: &str, seed: String) -> bool {
        if !self.close_menu_of(id) {
            return false;
        }
        self.modes
            .insert(id.to_owned(), ItemMode::Renaming { draft: seed });
        true
    }

    pub(crate) fn set_rename_draft(&mut self, id: &str, text: String) -> bool {
        match self.modes.get_mut(id) {
            Some(ItemMode::Renaming { draft }) => {
                *draft = text;
                true
            }
            _ => false,
        }
    }

    /// Leaves renaming and hands back the draft to commit.
    pub(crate) fn finish_rename(&mut self, id: &str) -> Option<String> {
        match self.modes.remove(id) {
            Some(ItemMode::Renaming { draft }) => Some(draft),
            Some(other) => {
                self.modes.insert(id.to_owned(), other);
                None
            }
            None => None,
        }
    }

    pub(crate) fn start_delete(&mut self, id: &str) -> bool {
        if !self.close_menu_of(id) {
            return false;
        }
        self.modes.insert(id.to_owned(), ItemMode::ConfirmingDelete);
        true
    }

    /// Leaves delete confirmation. Returns true if the row was confirming.
    pub(crate) fn end_delete(&mut self, id: &str) -> bool {
        if matches!(self.modes.get(id), Some(ItemMode::ConfirmingDelete)) {
            self.modes.remove(id);
            true
        } else {
            false
        }
    }

    /// Drops all state for a row that left the list. Returns true if its
    /// menu was the open one.
    pub(crate) fn forget(&mut self, id: &str) -> bool {
        self.modes.remove(id);
        self.close_menu_of(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_is_exclusive_and_toggles() {
        let mut ui = ListUiState::default();
        assert_eq!(ui.toggle_menu("a"), MenuToggle::Opened { previous: None });
        assert_eq!(
            ui.toggle_menu("b"),
            MenuToggle::Opened {
                previous: Some("a".to_string())
            }
        );
        assert_eq!(ui.item_state("a"), ItemState::Idle);
        assert_eq!(ui.item_state("b"), ItemState::MenuOpen);
        assert_eq!(ui.toggle_menu("b"), MenuToggle::Closed);
        assert_eq!(ui.open_menu(), None);
    }

    #[test]
    fn rename_requires_open_menu() {
        let mut ui = ListUiState::default();
        assert!(!ui.start_rename("a", "Title".into()));
        ui.toggle_menu("a");
        assert!(ui.start_rename("a", "Title".into()));
        assert_eq!(ui.open_menu(), None);
        assert_eq!(ui.toggle_menu("a"), MenuToggle::Ignored);
        assert!(ui.blocks_selection("a"));
    }

    #[test]
    fn finish_rename_leaves_delete_confirmation_alone() {
        let mut ui = ListUiState::default();
        ui.toggle_menu("a");
        ui.start_delete("a");
        assert_eq!(ui.finish_rename("a"), None);
        assert_eq!(ui.item_state("a"), ItemState::ConfirmingDelete);
    }
}
