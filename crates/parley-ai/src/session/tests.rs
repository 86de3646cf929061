//! Session tests against a scripted model.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use parley_common::ConfigError;

use super::Session;
use crate::{AiClient, AiError, AiResponse, ChunkCallback, Message, Role, TokenUsage};

/// Replies from a queue and records every window it was sent.
struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedClient {
    fn new(replies: impl IntoIterator<Item = Result<String, AiError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Answers every question with "reply N".
    fn echoing(count: usize) -> Arc<Self> {
        Self::new((0..count).map(|i| Ok(format!("reply {i}"))))
    }

    fn last_window(&self) -> Vec<Message> {
        self.seen.lock().unwrap().last().cloned().unwrap_or_default()
    }

    fn next(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        self.seen.lock().unwrap().push(messages.to_vec());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::ApiError("script exhausted".into())))?;
        Ok(AiResponse {
            content: reply,
            usage: TokenUsage {
                input_tokens: 3,
                output_tokens: 2,
            },
        })
    }
}

#[async_trait]
impl AiClient for ScriptedClient {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        self.next(messages)
    }

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        on_chunk: ChunkCallback,
    ) -> Result<AiResponse, AiError> {
        let response = self.next(messages)?;
        for word in response.content.split_inclusive(' ') {
            on_chunk(word.to_string());
        }
        Ok(response)
    }
}

fn session(client: &Arc<ScriptedClient>) -> Session {
    Session::new(client.clone())
}

#[tokio::test]
async fn pirate_scenario() {
    let client = ScriptedClient::new([Ok("Arrr, hello!".to_string())]);
    let mut session = session(&client);

    session.set_system_role("You are a pirate.");
    let reply = session.ask("Hello").await.unwrap();

    assert_eq!(reply, "Arrr, hello!");
    assert_eq!(
        session.messages(),
        vec![
            Message::system("You are a pirate."),
            Message::user("Hello"),
            Message::assistant("Arrr, hello!"),
        ]
    );
    assert_eq!(
        client.last_window(),
        vec![Message::system("You are a pirate."), Message::user("Hello")]
    );
}

#[test]
fn set_system_role_leaves_exactly_one_system_message() {
    let mut session = session(&ScriptedClient::echoing(0));
    for role in ["You are a pirate.", "  Translate to French  ", "x"] {
        session.set_system_role(role);
        assert_eq!(session.messages(), vec![Message::system(role)]);
        assert_eq!(session.system_role(), Some(role));
    }
}

#[test]
fn blank_role_leaves_memory_empty() {
    let mut session = session(&ScriptedClient::echoing(0));
    session.set_system_role("You are a pirate.");
    for blank in ["", "   ", "\n\t"] {
        session.set_system_role(blank);
        assert_eq!(session.message_count(), 0);
        assert!(session.system_role().is_none());
    }
}

#[tokio::test]
async fn set_system_role_discards_history() {
    let client = ScriptedClient::echoing(2);
    let mut session = session(&client);
    session.set_system_role("first");
    session.ask("one").await.unwrap();
    session.ask("two").await.unwrap();

    session.set_system_role("first");
    assert_eq!(session.messages(), vec![Message::system("first")]);
}

#[tokio::test]
async fn window_keeps_last_n_messages_without_role() {
    let n = 10;
    let client = ScriptedClient::echoing(n + 1);
    let mut session = session(&client);

    for i in 0..=n {
        session.ask(format!("question {i}")).await.unwrap();
    }

    let messages = session.messages();
    assert_eq!(messages.len(), n);
    // 22 messages were produced; the oldest six pairs are gone.
    assert_eq!(messages[0], Message::user("question 6"));
    assert_eq!(messages[n - 1], Message::assistant("reply 10"));
}

#[tokio::test]
async fn window_keeps_pinned_role_under_pressure() {
    let n = 10;
    let client = ScriptedClient::echoing(n + 1);
    let mut session = session(&client);
    session.set_system_role("You are a pirate.");

    for i in 0..=n {
        session.ask(format!("question {i}")).await.unwrap();
        assert!(session.message_count() <= n);
    }

    let messages = session.messages();
    assert_eq!(messages.len(), n);
    assert_eq!(messages[0], Message::system("You are a pirate."));
    assert_eq!(messages[n - 1], Message::assistant("reply 10"));
    assert_eq!(
        messages.iter().filter(|m| m.role == Role::System).count(),
        1
    );

    // The last request still led with the role.
    assert_eq!(client.last_window()[0], Message::system("You are a pirate."));
    assert_eq!(client.last_window().len(), n);
}

#[tokio::test]
async fn failure_propagates_and_leaves_memory_untouched() {
    let client = ScriptedClient::new([
        Ok("first answer".to_string()),
        Err(AiError::RateLimited),
    ]);
    let mut session = session(&client);
    session.set_system_role("role");
    session.ask("first").await.unwrap();
    let before = session.messages();

    let err = session.ask("second").await.unwrap_err();

    assert!(matches!(err, AiError::RateLimited));
    assert_eq!(session.messages(), before);
    assert_eq!(session.tracker().call_count(), 1);
}

#[tokio::test]
async fn empty_question_is_forwarded_as_is() {
    let client = ScriptedClient::new([Ok(String::new())]);
    let mut session = session(&client);

    let reply = session.ask("").await.unwrap();

    assert_eq!(reply, "");
    assert_eq!(client.last_window(), vec![Message::user("")]);
    assert_eq!(session.message_count(), 2);
}

#[tokio::test]
async fn streaming_delivers_chunks_and_full_reply() {
    let client = ScriptedClient::new([Ok("Arrr, hello there!".to_string())]);
    let mut session = session(&client);
    let chunks = Arc::new(Mutex::new(Vec::new()));
    let sink = chunks.clone();

    let reply = session
        .ask_streaming(
            "Hello",
            Box::new(move |chunk: String| sink.lock().unwrap().push(chunk)),
        )
        .await
        .unwrap();

    assert_eq!(reply, "Arrr, hello there!");
    assert_eq!(chunks.lock().unwrap().concat(), reply);
    assert_eq!(session.messages().last(), Some(&Message::assistant(reply)));
}

#[tokio::test]
async fn usage_is_tracked_per_successful_call() {
    let client = ScriptedClient::echoing(2);
    let mut session = session(&client);
    session.ask("a").await.unwrap();
    session.ask("b").await.unwrap();

    assert_eq!(session.tracker().call_count(), 2);
    assert_eq!(session.tracker().total_tokens(), 10);
    assert!(session.tracker().for_model("scripted").is_some());
}

#[tokio::test]
async fn clear_keeps_role() {
    let client = ScriptedClient::echoing(1);
    let mut session = session(&client);
    session.set_system_role("role");
    session.ask("hi").await.unwrap();

    session.clear();
    assert_eq!(session.messages(), vec![Message::system("role")]);
}

#[test]
fn with_max_messages_resizes_window() {
    let session = session(&ScriptedClient::echoing(0)).with_max_messages(4);
    assert_eq!(session.max_messages(), 4);
}

#[test]
fn construction_without_credential_fails() {
    let err = Session::from_lookup(|_| None).err().unwrap();
    assert!(matches!(err, ConfigError::MissingCredential(ref var) if var == "GEMINI_API_KEY"));

    let err = Session::from_lookup(|_| Some("   ".into())).err().unwrap();
    assert!(matches!(err, ConfigError::MissingCredential(_)));
}

#[test]
fn construction_with_credential_binds_default_model() {
    let session = Session::from_lookup(|_| Some("key".into())).unwrap();
    assert_eq!(session.model(), crate::DEFAULT_MODEL);
    assert_eq!(session.message_count(), 0);
    assert_eq!(session.max_messages(), 10);
}

#[test]
fn sessions_get_distinct_ids() {
    let client = ScriptedClient::echoing(0);
    assert_ne!(session(&client).id(), session(&client).id());
}
