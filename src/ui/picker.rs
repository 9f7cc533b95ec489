//! Character picker view model.
//!
//! The picker only owns its cursor. Whether a tile is selected is read from
//! the controller snapshot every time tiles are built.

use crate::core::characters::{Character, CharacterRegistry};
use crate::core::controller::ControllerSnapshot;
use crate::core::conversation::ConversationKind;

/// Wrapping cursor over a fixed number of entries.
#[derive(Debug, Clone)]
pub struct PickerState {
    pub title: String,
    pub selected: usize,
    len: usize,
}

impl PickerState {
    pub fn new<T: Into<String>>(title: T, len: usize, selected: usize) -> Self {
        Self {
            title: title.into(),
            selected,
            len,
        }
    }

    pub fn for_registry(registry: &CharacterRegistry) -> Self {
        Self::new("Characters", registry.len(), 0)
    }

    pub fn move_up(&mut self) {
        if self.len > 0 {
            if self.selected == 0 {
                self.selected = self.len - 1;
            } else {
                self.selected -= 1;
            }
        }
    }

    pub fn move_down(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + 1) % self.len;
        }
    }
}

/// One clickable character tile as the renderer draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterTile {
    pub character: Character,
    /// Tile is part of the current selection for `mode`.
    pub selected: bool,
    /// Position in the two-party selection (1 or 2), for the badge.
    pub order: Option<usize>,
    /// Cursor is on this tile.
    pub focused: bool,
}

pub fn character_tiles(
    registry: &CharacterRegistry,
    picker: &PickerState,
    snapshot: &ControllerSnapshot,
    mode: ConversationKind,
) -> Vec<CharacterTile> {
    registry
        .all()
        .iter()
        .enumerate()
        .map(|(index, character)| {
            let (selected, order) = match mode {
                ConversationKind::TwoParty => {
                    let position = snapshot.selection.iter().position(|c| c == character);
                    (position.is_some(), position.map(|p| p + 1))
                }
                ConversationKind::UserAndCharacter => {
                    (snapshot.solo.as_ref() == Some(character), None)
                }
            };
            CharacterTile {
                character: character.clone(),
                selected,
                order,
                focused: index == picker.selected,
            }
        })
        .collect()
}
