//! Conversation engine for Parley.
//!
//! Provides a Gemini chat client behind the `AiClient` capability, plus:
//! - A bounded chat memory with a pinned system role
//! - Conversation sessions (`set_system_role` / `ask`)
//! - Streaming (SSE) support
//! - Token usage tracking

pub mod gemini;
pub mod memory;
pub mod session;
pub mod streaming;
pub mod token_tracker;

use async_trait::async_trait;

pub use gemini::{GeminiClient, GeminiConfig, API_KEY_ENV, DEFAULT_MODEL};
pub use memory::{ChatMemory, DEFAULT_MAX_MESSAGES};
pub use session::Session;
pub use token_tracker::TokenTracker;

/// Callback receiving each text fragment of a streamed reply.
pub type ChunkCallback = Box<dyn Fn(String) + Send + Sync>;

/// A remote chat-completion model.
///
/// Takes the full ordered message window and returns one assistant reply.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Identifier of the model this client is bound to.
    fn model(&self) -> &str;

    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError>;

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        on_chunk: ChunkCallback,
    ) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Failures reported by the remote model. Never retried here.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Timeout
        } else {
            AiError::NetworkError(err.to_string())
        }
    }
}
