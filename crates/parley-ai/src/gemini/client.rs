//! Gemini API client struct, request building, and response parsing.

use std::time::Duration;

use parley_common::ConfigError;

use crate::{AiError, AiResponse, Message, Role, TokenUsage};

use super::config::GeminiConfig;

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ConfigError::ClientSetup(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn api_url(&self, stream: bool) -> String {
        let method = if stream {
            "streamGenerateContent"
        } else {
            "generateContent"
        };
        format!("{}/{}:{}", GEMINI_API_BASE, self.config.model, method)
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(&self, messages: &[Message]) -> serde_json::Value {
        let contents: Vec<_> = messages
            .iter()
            .filter_map(|msg| {
                let role = match msg.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                    Role::System => return None, // sent as systemInstruction
                };
                Some(serde_json::json!({
                    "role": role,
                    "parts": [{ "text": msg.content }]
                }))
            })
            .collect();

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            }
        });

        if let Some(system) = messages.iter().find(|m| m.role == Role::System) {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system.content }]
            });
        }

        body
    }

    /// Parse a complete `generateContent` response.
    pub(crate) fn parse_response(&self, json: &serde_json::Value) -> Result<AiResponse, AiError> {
        let first = json["candidates"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no candidates in response".to_string()))?
            .first()
            .ok_or_else(|| AiError::ParseError("empty candidates".to_string()))?;

        let content = candidate_text(first).ok_or_else(|| no_content_error(first))?;

        Ok(AiResponse {
            content,
            usage: parse_usage(json).unwrap_or_default(),
        })
    }
}

/// Concatenate every text part of one candidate.
///
/// `None` when the candidate carries no text part at all, which is how
/// Gemini reports a blocked or truncated reply.
pub(crate) fn candidate_text(candidate: &serde_json::Value) -> Option<String> {
    let texts: Vec<&str> = candidate["content"]["parts"]
        .as_array()?
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

/// Error for a candidate without text, naming its `finishReason`.
pub(crate) fn no_content_error(candidate: &serde_json::Value) -> AiError {
    let reason = candidate["finishReason"].as_str().unwrap_or("unknown");
    AiError::ApiError(format!("reply has no content (finish reason: {reason})"))
}

pub(crate) fn parse_usage(json: &serde_json::Value) -> Option<TokenUsage> {
    let meta = json.get("usageMetadata")?;
    Some(TokenUsage {
        input_tokens: meta["promptTokenCount"].as_u64().unwrap_or(0),
        output_tokens: meta["candidatesTokenCount"].as_u64().unwrap_or(0),
    })
}
