//! Shared constants used across the application

/// Number of automated turns a two-party conversation may take.
pub const TURN_LIMIT: u32 = 5;

/// Characters taking part in a two-party conversation.
pub const SELECTION_CAPACITY: usize = 2;

/// Service origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable that overrides the configured service origin.
pub const BASE_URL_ENV_VAR: &str = "PARLEY_BASE_URL";
