//! Configuration schema types for Parley.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for Parley.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    pub model: ModelConfig,
    pub memory: MemoryConfig,
    pub roles: RolesConfig,
    pub logging: LoggingConfig,
}

/// Remote model selection and generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    /// Valid range: 1-65536.
    pub max_tokens: u32,
    /// Valid range: 0.0-2.0.
    pub temperature: f64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.5-flash".into(),
            max_tokens: 4096,
            temperature: 0.7,
            api_key_env: "GEMINI_API_KEY".into(),
        }
    }
}

/// Chat memory window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Messages kept in the window, system role included (valid range: 2-1000).
    pub max_messages: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { max_messages: 10 }
    }
}

/// System role presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RolesConfig {
    /// Role applied when a session starts. Empty means no system role.
    pub default: String,
    /// Named roles selectable at runtime.
    pub presets: BTreeMap<String, String>,
}

impl RolesConfig {
    pub fn preset(&self, name: &str) -> Option<&str> {
        self.presets.get(name).map(String::as_str)
    }
}

impl Default for RolesConfig {
    fn default() -> Self {
        let presets = [
            (
                "assistant",
                "You are a helpful assistant. Answer clearly and concisely.",
            ),
            (
                "translator",
                "You are an interpreter. Translate English text into French, \
                 and text in any other language into English. \
                 Reply with the translation only.",
            ),
            (
                "guide",
                "You are a travel guide. For the place the user names, list the \
                 three main sights to visit and the typical price of a meal there.",
            ),
        ]
        .into_iter()
        .map(|(name, role)| (name.to_string(), role.to_string()))
        .collect();

        Self {
            default: String::new(),
            presets,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for this level.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
