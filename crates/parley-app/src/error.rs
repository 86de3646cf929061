use parley_ai::AiError;
use parley_common::{ConfigError, ParleyError};

/// Everything that can end a `parley` run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Parley(#[from] ParleyError),
}
