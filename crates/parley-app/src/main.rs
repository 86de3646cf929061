mod cli;
mod commands;
mod error;
mod repl;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use parley_ai::{GeminiConfig, Session};
use parley_common::{ConfigError, ParleyError};

use crate::error::AppError;
use parley_config::ParleyConfig;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

fn init_logging(directive: &str) {
    let directive: Directive = directive
        .parse()
        .unwrap_or_else(|_| Directive::from(LevelFilter::INFO));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &cli::Args) -> ParleyConfig {
    let loaded = match args.config {
        Some(ref path) => {
            tracing::info!("Using config override: {}", path.display());
            parley_config::load_config_from(path)
        }
        None => parley_config::load_config(),
    };
    loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        ParleyConfig::default()
    })
}

/// Build a Gemini-backed session from settings. Fails before any client
/// exists when the API key is missing.
fn build_session(config: &ParleyConfig) -> Result<Session, ConfigError> {
    let gemini = GeminiConfig::from_env_var(&config.model.api_key_env)?
        .with_model(config.model.name.as_str())
        .with_max_tokens(config.model.max_tokens)
        .with_temperature(config.model.temperature);

    let max_messages = usize::try_from(config.memory.max_messages).unwrap_or(usize::MAX);
    Ok(Session::with_gemini(gemini)?.with_max_messages(max_messages))
}

/// Pick the starting role: `--role`, then `--preset`, then `[roles].default`.
fn initial_role(args: &cli::Args, config: &ParleyConfig) -> Result<String, ParleyError> {
    if let Some(ref role) = args.role {
        return Ok(role.clone());
    }
    if let Some(ref name) = args.preset {
        return config
            .roles
            .preset(name)
            .map(str::to_string)
            .ok_or_else(|| ParleyError::Other(format!("no preset named '{name}'")));
    }
    Ok(config.roles.default.clone())
}

/// Ask a single question and print the reply.
async fn ask_once(session: &mut Session, question: String) -> Result<(), AppError> {
    let reply = session.ask(question).await?;
    println!("{reply}");
    Ok(())
}

async fn run(args: cli::Args, config: ParleyConfig) -> Result<(), AppError> {
    let role = initial_role(&args, &config)?;
    let mut session = build_session(&config)?;
    session.set_system_role(&role);
    tracing::info!(
        session = %session.id().short(),
        model = session.model(),
        has_role = session.system_role().is_some(),
        "Session ready"
    );

    match args.question {
        Some(question) => ask_once(&mut session, question).await,
        None => Ok(repl::run(&mut session, &config.roles, !args.no_stream).await?),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment
    let dotenv = dotenvy::dotenv();

    let args = cli::parse();
    let config = load_config(&args);

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| format!("parley={}", config.logging.level.directive()));
    init_logging(&directive);

    if let Err(e) = dotenv {
        tracing::debug!("No .env file loaded: {e}");
    }
    tracing::info!("Parley v{} starting", env!("CARGO_PKG_VERSION"));

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
