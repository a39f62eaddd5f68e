//! Base error types for hookwise
//!
//! This module provides the error type shared by every hookwise crate.
//! Spawn failures and non-zero hook exits are not errors; they are recorded
//! in the run aggregate.

use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An alias named by `hook.<event>.command` is declared but has no command
    #[error(
        "hook list could not be resolved for event '{event}': \
         hookcmd '{alias}' is declared without a command"
    )]
    UnresolvedAlias {
        /// Event being resolved
        event: String,
        /// Alias whose `hookcmd.<alias>.command` is empty
        alias: String,
    },

    /// Unrecognized hookdir policy token
    #[error("invalid hookdir policy '{value}' (expected one of: yes, no, warn, error, interactive)")]
    InvalidHookdirPolicy {
        /// The rejected token
        value: String,
    },

    /// Both a stdin file and streamed stdin lines were supplied
    #[error("a stdin file and streamed stdin lines cannot be used together")]
    ConflictingStdin,

    /// At least one hook was required but none resolved
    #[error("no hooks found for event '{event}'")]
    NoHooks {
        /// Event that resolved to an empty list
        event: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration for '{key}': {message}")]
    InvalidConfig {
        /// Configuration key
        key: String,
        /// What is wrong with it
        message: String,
    },

    /// Configuration store failure
    #[error("Configuration error: {0}")]
    Config(String),

    /// Hook execution error
    #[error("Hook execution error: {0}")]
    HookExecution(String),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
