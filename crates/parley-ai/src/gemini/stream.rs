//! Folding `streamGenerateContent` SSE events into one reply.

use tracing::debug;

use crate::streaming::SseEvent;
use crate::{AiError, AiResponse, TokenUsage};

use super::client::{candidate_text, no_content_error, parse_usage};

/// Accumulates streamed candidates.
#[derive(Debug, Default)]
pub(crate) struct StreamFold {
    content: String,
    usage: TokenUsage,
    saw_candidate: bool,
    saw_text: bool,
    /// Last candidate seen, kept for its `finishReason`.
    last_candidate: Option<serde_json::Value>,
}

impl StreamFold {
    /// Apply one event, returning the text it added (empty when none).
    pub(crate) fn apply(&mut self, event: &SseEvent) -> String {
        let Ok(data) = serde_json::from_str::<serde_json::Value>(&event.data) else {
            debug!(data = %event.data, "Skipping non-JSON SSE event");
            return String::new();
        };

        let mut chunk = String::new();
        if let Some(candidates) = data["candidates"].as_array() {
            for candidate in candidates {
                self.saw_candidate = true;
                if let Some(text) = candidate_text(candidate) {
                    self.saw_text = true;
                    chunk.push_str(&text);
                }
                self.last_candidate = Some(candidate.clone());
            }
        }
        self.content.push_str(&chunk);

        // Later events carry cumulative counts
        if let Some(latest) = parse_usage(&data) {
            self.usage = latest;
        }

        chunk
    }

    pub(crate) fn finish(self) -> Result<AiResponse, AiError> {
        if !self.saw_candidate {
            return Err(AiError::ParseError(
                "stream ended without candidates".to_string(),
            ));
        }
        if !self.saw_text {
            let last = self.last_candidate.unwrap_or_default();
            return Err(no_content_error(&last));
        }
        Ok(AiResponse {
            content: self.content,
            usage: self.usage,
        })
    }
}
