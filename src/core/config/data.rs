use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::characters::Character;
use crate::core::constants::{BASE_URL_ENV_VAR, DEFAULT_BASE_URL};
use crate::utils::url::normalize_base_url;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin of the conversation service (e.g., "http://localhost:8080")
    pub base_url: Option<String>,
    /// Extra characters listed after the built-in ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<Character>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    /// Pick the service origin: command-line flag, then environment, then
    /// config file, then the built-in default. Blank values are ignored.
    pub fn resolve_base_url(&self, flag: Option<&str>, env_value: Option<&str>) -> String {
        let chosen = [flag, env_value, self.base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        normalize_base_url(chosen)
    }

    /// Same as [`Config::resolve_base_url`], reading the environment variable.
    pub fn resolve_base_url_from_env(&self, flag: Option<&str>) -> String {
        let env_value = std::env::var(BASE_URL_ENV_VAR).ok();
        self.resolve_base_url(flag, env_value.as_deref())
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: (unset, using {DEFAULT_BASE_URL})"),
        }
        if self.characters.is_empty() {
            println!("  characters: (none beyond built-ins)");
        } else {
            println!("  characters:");
            for character in &self.characters {
                println!("    {} ({}) - {}", character.id, character.name, character.role);
            }
        }
    }
}
