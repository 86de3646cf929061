//! Model double shared by the app tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use parley_ai::{AiClient, AiError, AiResponse, ChunkCallback, Message, Session, TokenUsage};

/// Answers "echo: <last message>", or fails with the configured error.
pub struct EchoClient {
    pub fail_with: Mutex<Option<fn() -> AiError>>,
}

impl EchoClient {
    fn reply(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        if let Some(make_error) = *self.fail_with.lock().unwrap() {
            return Err(make_error());
        }
        let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        Ok(AiResponse {
            content: format!("echo: {last}"),
            usage: TokenUsage {
                input_tokens: 1,
                output_tokens: 1,
            },
        })
    }
}

#[async_trait]
impl AiClient for EchoClient {
    fn model(&self) -> &str {
        "echo"
    }

    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        self.reply(messages)
    }

    /// Streams the reply one word at a time.
    async fn send_message_streaming(
        &self,
        messages: &[Message],
        on_chunk: ChunkCallback,
    ) -> Result<AiResponse, AiError> {
        let response = self.reply(messages)?;
        for word in response.content.split_inclusive(' ') {
            on_chunk(word.to_string());
        }
        Ok(response)
    }
}

pub fn echo_session() -> (Arc<EchoClient>, Session) {
    let client = Arc::new(EchoClient {
        fail_with: Mutex::new(None),
    });
    let session = Session::new(client.clone());
    (client, session)
}
