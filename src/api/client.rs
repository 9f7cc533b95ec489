//! HTTP access to the remote conversation service.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{
    ContinueConversationRequest, ContinueConversationResponse, StartConversationRequest,
    StartConversationResponse, StartSingleConversationRequest, CONTINUE_CONVERSATION_PATH,
    START_CONVERSATION_PATH, START_SINGLE_CONVERSATION_PATH,
};
use crate::utils::url::construct_api_url;

/// Failure talking to the conversation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service answered with a non-2xx status. The body is not inspected.
    Status(u16),
    /// The request never completed or the response could not be decoded.
    Transport(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Status(status) => write!(f, "API Error: {status}"),
            ServiceError::Transport(message) => write!(f, "{message}"),
        }
    }
}

impl StdError for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}

/// The three lifecycle calls the controller needs from the backend.
#[async_trait]
pub trait ConversationService: Send + Sync {
    async fn start_conversation(
        &self,
        request: &StartConversationRequest,
    ) -> Result<StartConversationResponse, ServiceError>;

    async fn start_single_conversation(
        &self,
        request: &StartSingleConversationRequest,
    ) -> Result<StartConversationResponse, ServiceError>;

    async fn continue_conversation(
        &self,
        request: &ContinueConversationRequest,
    ) -> Result<ContinueConversationResponse, ServiceError>;
}

#[derive(Clone)]
pub struct HttpConversationService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpConversationService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let url = construct_api_url(&self.base_url, endpoint);
        debug!(%url, "posting to conversation service");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "conversation service rejected request");
            return Err(ServiceError::Status(status.as_u16()));
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl ConversationService for HttpConversationService {
    async fn start_conversation(
        &self,
        request: &StartConversationRequest,
    ) -> Result<StartConversationResponse, ServiceError> {
        self.post_json(START_CONVERSATION_PATH, request).await
    }

    async fn start_single_conversation(
        &self,
        request: &StartSingleConversationRequest,
    ) -> Result<StartConversationResponse, ServiceError> {
        self.post_json(START_SINGLE_CONVERSATION_PATH, request).await
    }

    async fn continue_conversation(
        &self,
        request: &ContinueConversationRequest,
    ) -> Result<ContinueConversationResponse, ServiceError> {
        self.post_json(CONTINUE_CONVERSATION_PATH, request).await
    }
}
