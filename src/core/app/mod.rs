//! Interactive session state.
//!
//! [`App`] ties the character registry, the picker cursor, and the
//! conversation controller together for the terminal front end. Key presses
//! and request completions arrive as [`AppAction`]s; anything that must reach
//! the network comes back out as an [`AppCommand`].

pub mod actions;


pub use actions::{apply_action, apply_actions, AppAction, AppActionDispatcher, AppCommand};

use crate::core::characters::{Character, CharacterRegistry};
use crate::core::controller::{ControllerSnapshot, ConversationController};
use crate::core::conversation::ConversationKind;
use crate::ui::picker::{character_tiles, CharacterTile, PickerState};

pub struct App {
    pub controller: ConversationController,
    pub registry: CharacterRegistry,
    pub picker: PickerState,
    /// Which kind of conversation the picker and Enter key act on.
    pub mode: ConversationKind,
    pub base_url: String,
    pub exit_requested: bool,
}

impl App {
    pub fn new(registry: CharacterRegistry, base_url: impl Into<String>) -> Self {
        let picker = PickerState::for_registry(&registry);
        Self {
            controller: ConversationController::new(),
            registry,
            picker,
            mode: ConversationKind::TwoParty,
            base_url: base_url.into(),
            exit_requested: false,
        }
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.controller.snapshot()
    }

    /// Character under the picker cursor.
    pub fn focused_character(&self) -> Option<&Character> {
        self.registry.get(self.picker.selected)
    }

    pub fn tiles(&self) -> Vec<CharacterTile> {
        character_tiles(&self.registry, &self.picker, &self.snapshot(), self.mode)
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ConversationKind::TwoParty => ConversationKind::UserAndCharacter,
            ConversationKind::UserAndCharacter => ConversationKind::TwoParty,
        };
    }

    pub fn accepts_text_input(&self) -> bool {
        self.mode == ConversationKind::UserAndCharacter
    }
}
