//! Hookwise CLI library
//!
//! This library contains all the CLI logic for hookwise, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;

/// Hookwise - run the commands configured for git hook events
#[derive(Parser)]
#[command(name = "hookwise")]
#[command(about = "Run the commands configured for git hook events")]
#[command(version)]
#[command(long_about = "Run the commands configured for git hook events

Hooks are declared in git config and run in declaration order:

  git config --add hook.pre-commit.command \"cargo fmt --check\"
  git config --add hook.pre-commit.command lint
  git config hookcmd.lint.command ~/bin/lint.sh

A script in the hooks directory (.git/hooks or core.hooksPath) runs last,
subject to hook.runHookDir (yes, no, warn, error, interactive).")]
pub struct Cli {
    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "HOOKWISE_LOG_FILE", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Run as if started in this directory
    #[arg(short = 'C', value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Set a configuration value for this invocation (repeatable)
    #[arg(short = 'c', value_name = "KEY=VALUE")]
    pub config: Vec<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for hookwise CLI
#[derive(Subcommand)]
pub enum Commands {
    /// List the hooks configured for an event
    List(cmd::list::ListCommand),

    /// Run the hooks configured for an event
    #[command(long_about = "Run the hooks configured for an event

Every hook runs even when an earlier one fails. The exit status is the
bitwise OR of the hooks' exit statuses (128 + signal for killed hooks,
1 for hooks that could not be started).

Examples:
  • hookwise run pre-commit
      → Run the pre-commit hooks

  • hookwise run pre-push -j 4 --stdin-line \"refs/heads/main abc refs/heads/main def\" -- origin url
      → Run pre-push hooks four at a time, feeding one ref line

  • hookwise run post-checkout --ignore-missing
      → Succeed when nothing is configured")]
    Run(cmd::run::RunCommand),
}

/// Execute the command based on the command type
fn execute_command(command: &Commands, context: &RuntimeContext) -> Result<i32> {
    match command {
        Commands::List(list_cmd) => {
            list_cmd.execute(context)?;
            Ok(0)
        }
        Commands::Run(run_cmd) => Ok(run_cmd.execute(context)?),
    }
}

/// Main entry point for the CLI logic
///
/// Returns the process exit code.
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - The git configuration cannot be opened
/// - Hook resolution fails or the run options are contradictory
pub fn run(cli: Cli) -> Result<i32> {
    // Initialize logging based on verbosity
    hookwise_config::logging::init(cli.verbose, cli.log_file.as_deref())
        .context("Failed to initialize logging")?;

    let hookdir_policy = match &cli.command {
        Commands::List(list_cmd) => list_cmd.run_hookdir,
        Commands::Run(run_cmd) => run_cmd.run_hookdir,
    };

    let context = RuntimeContext::new(cli.directory.as_deref(), &cli.config, hookdir_policy)?;

    execute_command(&cli.command, &context)
}
