//! Command trait for the hookwise CLI
//!
//! Every subcommand implements [`Command`] and receives a [`RuntimeContext`]
//! holding the hook engine for the repository being worked on.

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all hookwise commands
///
/// # Example
///
/// ```rust,ignore
/// use crate::command::Command;
/// use crate::common::RuntimeContext;
/// use crate::error::Result;
/// use clap::Args;
///
/// #[derive(Debug, Args)]
/// pub struct CountCommand {
///     pub event: String,
/// }
///
/// impl Command for CountCommand {
///     type Output = usize;
///
///     fn execute(&self, context: &RuntimeContext) -> Result<usize> {
///         Ok(context.engine.resolve(&self.event)?.len())
///     }
/// }
/// ```
pub trait Command {
    /// The type returned by this command
    ///
    /// `list` returns `()`; `run` returns the process exit code.
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute. Hook failures
    /// are not errors; they show up in the exit code.
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
