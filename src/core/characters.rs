//! Character registry
//!
//! Built-in characters are embedded from `builtin_characters.toml` at build
//! time. The config file may append extra characters after them.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::config::data::Config;

/// A selectable conversational character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    /// Identifier the conversation service knows this character by.
    pub id: String,
    pub name: String,
    pub role: String,
}

impl Character {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BuiltinCharactersConfig {
    characters: Vec<Character>,
}

/// Load built-in characters from the embedded configuration
pub fn load_builtin_characters() -> Vec<Character> {
    const CONFIG_CONTENT: &str = include_str!("builtin_characters.toml");

    let config: BuiltinCharactersConfig =
        toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtin_characters.toml");

    config.characters
}

/// Ordered, immutable list of the characters a user can pick from.
#[derive(Debug, Clone)]
pub struct CharacterRegistry {
    characters: Vec<Character>,
}

impl CharacterRegistry {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    pub fn builtin() -> Self {
        Self::new(load_builtin_characters())
    }

    /// Built-ins followed by the config's custom characters. Custom entries
    /// reusing an existing id are skipped.
    pub fn from_config(config: &Config) -> Self {
        let mut characters = load_builtin_characters();
        for custom in &config.characters {
            if characters
                .iter()
                .any(|existing| existing.id.eq_ignore_ascii_case(&custom.id))
            {
                warn!(id = %custom.id, "skipping custom character with duplicate id");
                continue;
            }
            characters.push(custom.clone());
        }
        Self::new(characters)
    }

    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    pub fn get(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Find a character by id (case-insensitive)
    pub fn find(&self, id: &str) -> Option<&Character> {
        self.characters
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(id))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.characters.iter().map(|c| c.id.as_str()).collect()
    }
}
