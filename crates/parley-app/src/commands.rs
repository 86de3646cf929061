//! Slash commands understood by the interactive loop.

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: send it to the model.
    Ask(String),
    /// `/role <text>`; empty text clears the role.
    Role(String),
    Preset(String),
    Presets,
    History,
    Clear,
    Usage,
    Help,
    Quit,
    /// Blank line.
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Command::Empty);
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Ok(Command::Ask(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "role" => Ok(Command::Role(arg.to_string())),
            "preset" if arg.is_empty() => Err("usage: /preset <name>".to_string()),
            "preset" => Ok(Command::Preset(arg.to_string())),
            "presets" => Ok(Command::Presets),
            "history" => Ok(Command::History),
            "clear" => Ok(Command::Clear),
            "usage" => Ok(Command::Usage),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command /{other} (try /help)")),
        }
    }
}

pub const HELP: &str = "\
Type a question and press Enter. Commands:
  /role <text>     set the system role and start over (no text clears it)
  /preset <name>   use a named role from the config
  /presets         list named roles
  /history         show the messages in memory
  /clear           forget the conversation, keep the role
  /usage           token usage so far
  /quit            leave";
