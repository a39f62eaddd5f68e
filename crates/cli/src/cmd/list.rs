//! List command implementation
//!
//! Shows the hooks that would run for an event, in execution order.

use clap::{Args, ValueEnum};
use hookwise_engine::{HookListing, HookdirPolicy};
use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Output format for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `<origin>: <command>` line per hook
    #[default]
    Simple,
    /// A JSON document
    Json,
}

/// List command
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Hook event to list (e.g. pre-commit)
    #[arg(required = true)]
    pub event: String,

    /// Override `hook.runHookDir` (yes, no, warn, error, interactive)
    #[arg(long, env = "HOOKWISE_RUN_HOOKDIR", value_name = "POLICY")]
    pub run_hookdir: Option<HookdirPolicy>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Simple)]
    pub format: OutputFormat,
}

impl Command for ListCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let listings = context.engine.list(&self.event)?;
        let mut out = io::stdout().lock();

        match self.format {
            OutputFormat::Json => {
                let json = listing_json(&self.event, &listings);
                writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
            }
            OutputFormat::Simple => write_simple(&mut out, &self.event, &listings)?,
        }

        Ok(())
    }
}

fn write_simple(out: &mut impl Write, event: &str, listings: &[HookListing]) -> io::Result<()> {
    if listings.is_empty() {
        return writeln!(out, "{}", empty_message(event));
    }
    for listing in listings {
        match listing.annotation {
            Some(annotation) => writeln!(
                out,
                "{}: {} {}",
                listing.origin.cyan(),
                listing.identity,
                format!("({annotation})").yellow()
            )?,
            None => writeln!(out, "{}: {}", listing.origin.cyan(), listing.identity)?,
        }
    }
    Ok(())
}

fn empty_message(event: &str) -> String {
    format!("no commands configured for hook '{event}'")
}

fn listing_json(event: &str, listings: &[HookListing]) -> serde_json::Value {
    serde_json::json!({
        "event": event,
        "hooks": listings,
    })
}
