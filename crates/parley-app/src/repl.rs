//! Interactive chat loop over stdin.

use std::io::Write;

use parley_ai::{AiError, Role, Session};
use parley_common::ParleyError;
use parley_config::RolesConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::commands::{Command, HELP};

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Read commands from stdin until EOF or `/quit`.
pub async fn run(session: &mut Session, roles: &RolesConfig, stream: bool) -> Result<(), ParleyError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = std::io::stdout();

    writeln!(out, "parley ({}), /help for commands", session.model())?;
    prompt(&mut out)?;

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(command) => {
                if handle(session, roles, command, stream, &mut out).await? == Flow::Quit {
                    break;
                }
            }
            Err(msg) => writeln!(out, "{msg}")?,
        }
        prompt(&mut out)?;
    }

    info!(session = %session.id().short(), "Conversation ended");
    Ok(())
}

fn prompt(out: &mut impl Write) -> Result<(), ParleyError> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Apply one command to the session, writing any output to `out`.
pub async fn handle<W: Write>(
    session: &mut Session,
    roles: &RolesConfig,
    command: Command,
    stream: bool,
    out: &mut W,
) -> Result<Flow, ParleyError> {
    match command {
        Command::Empty => {}
        Command::Ask(question) => {
            let result = if stream {
                ask_streaming(session, question, out).await?
            } else {
                session.ask(question).await
            };
            match result {
                Ok(reply) => writeln!(out, "{reply}")?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        Command::Role(role) => {
            session.set_system_role(&role);
            match session.system_role() {
                Some(_) => writeln!(out, "role set, conversation restarted")?,
                None => writeln!(out, "role cleared, conversation restarted")?,
            }
        }
        Command::Preset(name) => match roles.preset(&name) {
            Some(role) => {
                debug!(preset = %name, "Applying role preset");
                session.set_system_role(role);
                writeln!(out, "using preset '{name}', conversation restarted")?;
            }
            None => writeln!(out, "no preset named '{name}'")?,
        },
        Command::Presets => {
            for (name, role) in &roles.presets {
                writeln!(out, "{name:<12} {role}")?;
            }
        }
        Command::History => {
            for message in session.messages() {
                let tag = match message.role {
                    Role::System => "system",
                    Role::User => "you",
                    Role::Assistant => "model",
                };
                writeln!(out, "[{tag}] {}", message.content)?;
            }
            writeln!(
                out,
                "({}/{} messages)",
                session.message_count(),
                session.max_messages()
            )?;
        }
        Command::Clear => {
            session.clear();
            writeln!(out, "history cleared")?;
        }
        Command::Usage => {
            let tracker = session.tracker();
            writeln!(
                out,
                "{} calls, {} input + {} output tokens",
                tracker.call_count(),
                tracker.total().input_tokens,
                tracker.total().output_tokens
            )?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Ask with streaming, writing fragments to `out` as they arrive.
///
/// On success the returned reply is empty since its text is already out.
async fn ask_streaming<W: Write>(
    session: &mut Session,
    question: String,
    out: &mut W,
) -> Result<Result<String, AiError>, ParleyError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let ask = session.ask_streaming(
        question,
        Box::new(move |chunk: String| {
            // Receiver only goes away after a write error, reported below
            let _ = tx.send(chunk);
        }),
    );
    let write = async {
        while let Some(chunk) = rx.recv().await {
            write!(out, "{chunk}")?;
            out.flush()?;
        }
        Ok::<(), ParleyError>(())
    };

    let (result, written) = tokio::join!(ask, write);
    written?;
    Ok(result.map(|_| String::new()))
}
