//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r#"# Parley Configuration
# Only override what you want to change -- missing fields use defaults.
# The API key is read from the environment, never from this file.

[model]
# name = "gemini-2.5-flash"
# max_tokens = 4096        # 1-65536
# temperature = 0.7        # 0.0-2.0
# api_key_env = "GEMINI_API_KEY"

[memory]
# max_messages = 10        # 2-1000, system role included

[roles]
# Role applied to every new session ("" = none).
# default = ""

# Named roles, selectable with --preset or /preset.
# Defining this table replaces the built-in presets.
# [roles.presets]
# assistant = "You are a helpful assistant. Answer clearly and concisely."
# pirate = "You are a pirate."

[logging]
# level = "INFO"           # DEBUG, INFO, WARNING, ERROR
"#
}
