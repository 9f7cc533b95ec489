use crate::core::characters::Character;
use crate::core::constants::SELECTION_CAPACITY;

/// Ordered characters picked for a two-party conversation.
///
/// Never holds more than [`SELECTION_CAPACITY`] entries and never holds the
/// same character twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    characters: Vec<Character>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `character` if there is room and it is not already picked.
    /// Returns whether the set changed.
    pub fn insert(&mut self, character: &Character) -> bool {
        if self.is_full() || self.contains(character) {
            return false;
        }
        self.characters.push(character.clone());
        true
    }

    pub fn contains(&self, character: &Character) -> bool {
        self.characters.iter().any(|c| c == character)
    }

    pub fn is_full(&self) -> bool {
        self.characters.len() >= SELECTION_CAPACITY
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn clear(&mut self) {
        self.characters.clear();
    }

    pub fn as_slice(&self) -> &[Character] {
        &self.characters
    }

    /// Both characters, in pick order, once the set is full.
    pub fn pair(&self) -> Option<(&Character, &Character)> {
        match self.characters.as_slice() {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }
}
