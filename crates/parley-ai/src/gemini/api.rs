//! AiClient trait implementation for GeminiClient (send_message + streaming).

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, AiError, AiResponse, ChunkCallback, Message};

use super::client::GeminiClient;
use super::stream::StreamFold;

/// Map a non-success HTTP status and its body to an `AiError`.
pub(crate) fn status_error(status: StatusCode, body: &str) -> AiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        AiError::RateLimited
    } else {
        AiError::ApiError(format!("HTTP {status}: {body}"))
    }
}

impl GeminiClient {
    /// POST the request body and map non-success statuses to `AiError`.
    async fn post(&self, url: &str, messages: &[Message]) -> Result<reqwest::Response, AiError> {
        let body = self.build_request_body(messages);

        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(status_error(status, &text))
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        debug!(model = %self.config.model, messages = messages.len(), "Gemini API request");

        let response = self.post(&self.api_url(false), messages).await?;
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(&json)
    }

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        on_chunk: ChunkCallback,
    ) -> Result<AiResponse, AiError> {
        let url = format!("{}?alt=sse", self.api_url(true));

        debug!(model = %self.config.model, messages = messages.len(), "Gemini API streaming request");

        let response = self.post(&url, messages).await?;

        let mut fold = StreamFold::default();
        parse_sse_stream(response, |event: SseEvent| {
            let chunk = fold.apply(&event);
            if !chunk.is_empty() {
                on_chunk(chunk);
            }
        })
        .await?;

        fold.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_requests_is_rate_limited() {
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "quota exceeded");
        assert!(matches!(err, AiError::RateLimited));
    }

    #[test]
    fn other_statuses_carry_status_and_body() {
        let err = status_error(StatusCode::FORBIDDEN, "API key not valid");
        match err {
            AiError::ApiError(msg) => assert_eq!(msg, "HTTP 403 Forbidden: API key not valid"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), "API error: HTTP 500 Internal Server Error: ");
    }
}
