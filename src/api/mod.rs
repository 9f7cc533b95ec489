//! Payloads exchanged with the remote conversation service.

use serde::{Deserialize, Serialize};

use crate::core::message::Message;

pub mod client;

pub use client::{ConversationService, HttpConversationService, ServiceError};

pub const START_CONVERSATION_PATH: &str = "api/startConversation";
pub const START_SINGLE_CONVERSATION_PATH: &str = "api/startSingleConversation";
pub const CONTINUE_CONVERSATION_PATH: &str = "api/continueConversation";

/// Body of `POST /api/startConversation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartConversationRequest {
    pub gpt1_id: String,
    pub gpt2_id: String,
}

/// Body of `POST /api/startSingleConversation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSingleConversationRequest {
    pub gpt_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartConversationResponse {
    pub conversation_id: String,
}

/// Body of `POST /api/continueConversation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueConversationRequest {
    pub conversation_id: String,
    pub user_message: String,
    pub speaker_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContinueConversationResponse {
    pub messages: Vec<Message>,
}
