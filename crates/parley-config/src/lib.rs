//! Parley configuration system.
//!
//! Provides TOML-based settings for the model, the chat memory window,
//! role presets, and logging. All sections use sensible defaults so
//! partial configs work out of the box. The API key is never read from
//! the file; `[model].api_key_env` only names the environment variable.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use parley_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("model: {}", config.model.name);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LogLevel, LoggingConfig, MemoryConfig, ModelConfig, ParleyConfig, RolesConfig};
pub use toml_loader::{create_default_config, default_config_path, load_default, load_from_path};

use parley_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<ParleyConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
