use std::error::Error as StdError;
use std::fmt;

use crate::api::ServiceError;

pub const NEED_TWO_CHARACTERS: &str = "Select two characters to start a conversation.";
pub const NEED_ONE_CHARACTER: &str = "Select a character to start a conversation.";
pub const NO_ACTIVE_CONVERSATION: &str =
    "No active conversation. Please start a conversation first.";
pub const ADVANCE_NEEDS_TWO_PARTY: &str =
    "Turns only advance on their own in a two-character conversation. Type a message instead.";
pub const SUBMIT_NEEDS_SINGLE: &str =
    "Messages can only be sent in a conversation with a single character.";
pub const EMPTY_MESSAGE: &str = "Type a message before sending.";
pub const CONVERSATION_ENDED: &str = "The conversation has ended. Start a new conversation.";

/// Why a controller command did not go through.
///
/// The `Display` text is what gets shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// A precondition failed; no request was made.
    Validation(String),
    /// The service answered with a non-2xx status.
    Request { status: u16 },
    /// The request failed in flight or its response could not be read.
    Transport(String),
    /// The two-party turn limit has been reached; no request was made.
    ConversationEnded,
}

impl ControllerError {
    pub fn validation(message: impl Into<String>) -> Self {
        ControllerError::Validation(message.into())
    }
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Validation(message) => write!(f, "{message}"),
            ControllerError::Request { status } => write!(f, "Error: API Error: {status}"),
            ControllerError::Transport(message) => write!(f, "Error: {message}"),
            ControllerError::ConversationEnded => write!(f, "{CONVERSATION_ENDED}"),
        }
    }
}

impl StdError for ControllerError {}

impl From<ServiceError> for ControllerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Status(status) => ControllerError::Request { status },
            ServiceError::Transport(message) => ControllerError::Transport(message),
        }
    }
}
