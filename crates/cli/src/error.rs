//! Error types for CLI commands
//!
//! Commands return [`CommandError`]; `main` converts whatever reaches it into
//! a miette report.

use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Resolution, configuration or run contract error from the engine
    #[error(transparent)]
    Engine(#[from] hookwise_core::Error),

    /// Interactive confirmation failed
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;
