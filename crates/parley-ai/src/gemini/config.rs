//! Gemini API client configuration.

use parley_common::ConfigError;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }

    /// Create config from the `GEMINI_API_KEY` environment variable.
    ///
    /// Fails with [`ConfigError::MissingCredential`] when the variable is
    /// unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_var(API_KEY_ENV)
    }

    /// Same as [`GeminiConfig::from_env`] with a different variable name.
    pub fn from_env_var(var: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(var, |name| std::env::var(name).ok())
    }

    /// Resolve the credential through `lookup` instead of the process
    /// environment.
    pub fn from_lookup(
        var: &str,
        lookup: impl FnOnce(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        match lookup(var) {
            Some(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(ConfigError::MissingCredential(var.to_string())),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}
