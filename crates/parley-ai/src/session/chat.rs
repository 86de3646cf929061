//! Async chat methods for Session (ask + streaming).

use tracing::{debug, warn};

use crate::memory::ChatMemory;
use crate::{AiError, AiResponse, ChunkCallback, Message};

use super::manager::Session;

impl Session {
    /// Send `question` with the current history and return the reply verbatim.
    ///
    /// Memory only changes when the model answers: on error it is left
    /// exactly as it was before the call.
    pub async fn ask(&mut self, question: impl Into<String>) -> Result<String, AiError> {
        let pending = self.pending_with(question.into());
        let window = pending.messages();

        debug!(session = %self.id.short(), model = self.client.model(), window = window.len(), "Asking model");
        let result = self.client.send_message(&window).await;
        self.commit(pending, result)
    }

    /// Same as [`Session::ask`], passing reply fragments to `on_chunk` as
    /// they arrive.
    pub async fn ask_streaming(
        &mut self,
        question: impl Into<String>,
        on_chunk: ChunkCallback,
    ) -> Result<String, AiError> {
        let pending = self.pending_with(question.into());
        let window = pending.messages();

        debug!(session = %self.id.short(), model = self.client.model(), window = window.len(), "Asking model (streaming)");
        let result = self.client.send_message_streaming(&window, on_chunk).await;
        self.commit(pending, result)
    }

    fn pending_with(&self, question: String) -> ChatMemory {
        let mut pending = self.memory.clone();
        pending.add(Message::user(question));
        pending
    }

    fn commit(
        &mut self,
        mut pending: ChatMemory,
        result: Result<AiResponse, AiError>,
    ) -> Result<String, AiError> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(session = %self.id.short(), error = %e, "Model call failed, history unchanged");
                return Err(e);
            }
        };

        self.tracker.record(self.client.model(), &response.usage);
        pending.add(Message::assistant(response.content.clone()));
        self.memory = pending;
        Ok(response.content)
    }
}
