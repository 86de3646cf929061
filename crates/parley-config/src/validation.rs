//! Full configuration validation.
//!
//! Validates numeric ranges and required strings.

use crate::schema::ParleyConfig;
use parley_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ParleyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_non_blank(&mut errors, "model.name", &config.model.name);
    validate_non_blank(&mut errors, "model.api_key_env", &config.model.api_key_env);
    validate_range(&mut errors, "model.max_tokens", config.model.max_tokens, 1, 65536);
    validate_range_f64(&mut errors, "model.temperature", config.model.temperature, 0.0, 2.0);

    validate_range(&mut errors, "memory.max_messages", config.memory.max_messages, 2, 1000);

    for (name, role) in &config.roles.presets {
        validate_non_blank(&mut errors, "roles.presets key", name);
        validate_non_blank(&mut errors, &format!("roles.presets.{name}"), role);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_non_blank(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
