//! Session struct, construction, and role management.

use std::sync::Arc;

use parley_common::{ConfigError, SessionId};
use tracing::{debug, info};

use crate::gemini::{GeminiClient, GeminiConfig, API_KEY_ENV};
use crate::memory::ChatMemory;
use crate::token_tracker::TokenTracker;
use crate::{AiClient, Message};

/// A conversation with a remote model, keeping a bounded message history.
///
/// Calls take `&mut self`, so a session serves one request at a time.
/// Share it across tasks only behind a lock.
pub struct Session {
    pub(super) id: SessionId,
    pub(super) client: Arc<dyn AiClient>,
    /// Sliding window of recent messages, system role pinned at the head.
    pub(super) memory: ChatMemory,
    pub(super) tracker: TokenTracker,
}

impl Session {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        let id = SessionId::new();
        debug!(session = %id.short(), model = client.model(), "Session created");
        Self {
            id,
            client,
            memory: ChatMemory::default(),
            tracker: TokenTracker::new(),
        }
    }

    /// Build a Gemini-backed session from the `GEMINI_API_KEY` environment
    /// variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Session::from_env`], resolving the credential through `lookup`.
    pub fn from_lookup(lookup: impl FnOnce(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = GeminiConfig::from_lookup(API_KEY_ENV, lookup)?;
        Self::with_gemini(config)
    }

    pub fn with_gemini(config: GeminiConfig) -> Result<Self, ConfigError> {
        info!(model = %config.model, "Connecting to Gemini");
        let client = GeminiClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Resize the memory window. Existing history is dropped.
    pub fn with_max_messages(mut self, max: usize) -> Self {
        let system = self.memory.system_message().cloned();
        self.memory = ChatMemory::with_max_messages(max);
        if let Some(system) = system {
            self.memory.add(system);
        }
        self
    }

    /// Replace the system role and start the conversation over.
    ///
    /// Memory is always cleared. A non-blank `role` becomes the single system
    /// message; a blank one leaves memory empty.
    pub fn set_system_role(&mut self, role: &str) {
        self.memory.clear();
        if !role.trim().is_empty() {
            self.memory.add(Message::system(role));
        }
        debug!(
            session = %self.id.short(),
            has_role = !self.memory.is_empty(),
            "System role set, history cleared"
        );
    }

    /// The active system role, if any.
    pub fn system_role(&self) -> Option<&str> {
        self.memory.system_message().map(|m| m.content.as_str())
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Messages currently in the window, system role first.
    pub fn messages(&self) -> Vec<Message> {
        self.memory.messages()
    }

    pub fn message_count(&self) -> usize {
        self.memory.len()
    }

    pub fn max_messages(&self) -> usize {
        self.memory.max_messages()
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }

    /// Clear conversation history, keeping the system role.
    pub fn clear(&mut self) {
        self.memory.clear_turns();
    }
}
