use thiserror::Error;

// Import module-level errors for AppError
use crate::command::CommandError;
use crate::config::ConfigError;

/// Top-level application error that wraps all module-specific errors
///
/// Module errors convert into AppError via `From`, so `?` works across
/// layers. The variant decides the process exit status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl AppError {
    /// Exit status for this error: 2 for bad configuration, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::Command(_) => 1,
        }
    }
}

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
