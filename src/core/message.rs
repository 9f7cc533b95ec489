use serde::{Deserialize, Serialize};

/// Author of a transcript entry as reported by the conversation service.
/// Roles the client has no special handling for are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TranscriptRole {
    User,
    Assistant,
    System,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: TranscriptRole,
    #[serde(default)]
    pub content: String,
}

impl TranscriptRole {
    pub fn as_str(&self) -> &str {
        match self {
            TranscriptRole::User => "user",
            TranscriptRole::Assistant => "assistant",
            TranscriptRole::System => "system",
            TranscriptRole::Other(role) => role,
        }
    }

    pub fn is_user(&self) -> bool {
        *self == TranscriptRole::User
    }

    pub fn is_assistant(&self) -> bool {
        *self == TranscriptRole::Assistant
    }
}

impl AsRef<str> for TranscriptRole {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for TranscriptRole {
    fn from(value: &str) -> Self {
        match value {
            "user" => TranscriptRole::User,
            "assistant" => TranscriptRole::Assistant,
            "system" => TranscriptRole::System,
            other => TranscriptRole::Other(other.to_string()),
        }
    }
}

impl From<String> for TranscriptRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" | "assistant" | "system" => Self::from(value.as_str()),
            _ => TranscriptRole::Other(value),
        }
    }
}

impl From<TranscriptRole> for String {
    fn from(value: TranscriptRole) -> Self {
        match value {
            TranscriptRole::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl Message {
    pub fn new(role: TranscriptRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::Assistant, content)
    }
}

/// Keep only the assistant-authored entries, preserving order.
pub fn assistant_only(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .filter(|message| message.role.is_assistant())
        .cloned()
        .collect()
}
