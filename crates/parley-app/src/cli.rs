use std::path::PathBuf;

use clap::Parser;

/// Parley — chat with a Gemini model from the terminal.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. "parley=debug").
    #[arg(long)]
    pub log_level: Option<String>,

    /// System role for the conversation.
    #[arg(short = 'r', long, conflicts_with = "preset")]
    pub role: Option<String>,

    /// Named role preset from the config file.
    #[arg(short = 'p', long)]
    pub preset: Option<String>,

    /// Print replies only once complete.
    #[arg(long)]
    pub no_stream: bool,

    /// Ask a single question and exit.
    pub question: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
