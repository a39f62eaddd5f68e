//! # Hookwise Engine
//!
//! Resolves the commands configured for a git event and runs them.
//!
//! - **Resolution**: `hook.<event>.command` values, `hookcmd` aliases and the
//!   legacy hooks directory, merged into one ordered list
//! - **Hookdir Policy**: whether legacy scripts take part and how they are
//!   annotated
//! - **Execution**: a bounded worker pool with streamed stdin and an OR-ed
//!   result
//! - **Facade**: [`HookEngine`] bundling configuration, hooks directory and
//!   the advisory log

pub mod engine;
pub mod hooks;

// Re-export error types from core
pub use hookwise_core::{Error, Result};

// Re-export commonly used types
pub use engine::HookEngine;
pub use hooks::{
    HookList, HookListing, HookSpec, HookdirPolicy, Provenance, RunAggregate, RunOptions,
};
