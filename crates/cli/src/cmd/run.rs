//! Run command implementation
//!
//! Resolves the hooks for an event, applies the hookdir policy to legacy
//! scripts and runs what is left. The exit code is the OR of the hooks'
//! results.

use clap::Args;
use hookwise_engine::hooks::{HookStatus, Runner};
use hookwise_engine::{HookList, HookSpec, HookdirPolicy, Provenance, RunAggregate, RunOptions};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Run command
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Hook event to run (e.g. pre-push)
    #[arg(required = true)]
    pub event: String,

    /// Number of hooks to run at the same time (default: `hook.jobs`, or 1)
    #[arg(short, long, env = "HOOKWISE_JOBS", value_name = "N")]
    pub jobs: Option<usize>,

    /// Redirect every hook's stdin from a file
    #[arg(long, value_name = "FILE")]
    pub to_stdin: Option<PathBuf>,

    /// Line fed to every hook's stdin (repeatable)
    #[arg(long = "stdin-line", value_name = "LINE")]
    pub stdin_lines: Vec<String>,

    /// Extra environment variable for the hooks (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Succeed quietly when no hooks are configured
    #[arg(long)]
    pub ignore_missing: bool,

    /// Override `hook.runHookDir` (yes, no, warn, error, interactive)
    #[arg(long, env = "HOOKWISE_RUN_HOOKDIR", value_name = "POLICY")]
    pub run_hookdir: Option<HookdirPolicy>,

    /// Arguments passed to every hook
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

impl Command for RunCommand {
    type Output = i32;

    fn execute(&self, context: &RuntimeContext) -> Result<i32> {
        let jobs = match self.jobs {
            Some(jobs) => jobs,
            None => context.engine.default_jobs()?.unwrap_or(1),
        };
        let options = self.options(jobs, context.work_dir.as_deref());

        let runner = Runner::new(&self.event, &options);
        runner.validate()?;

        let mut hooks = context.engine.resolve(&self.event)?;
        enforce_hookdir_policy(&mut hooks, confirm_interactive)?;

        let aggregate = runner.run(&hooks)?;
        report(&aggregate);
        Ok(aggregate.result_bits)
    }
}

impl RunCommand {
    fn options(&self, jobs: usize, work_dir: Option<&Path>) -> RunOptions {
        let mut options = RunOptions::new()
            .jobs(jobs)
            .args(self.args.iter().cloned())
            .require_at_least_one(!self.ignore_missing);

        if let Some(path) = &self.to_stdin {
            options = options.stdin_file(path);
        }
        if !self.stdin_lines.is_empty() {
            options = options.stdin_lines(self.stdin_lines.clone());
        }
        for (key, value) in &self.env {
            options = options.env(key, value);
        }
        if let Some(dir) = work_dir {
            options = options.dir(dir);
        }
        options
    }
}

/// Parse a `KEY=VALUE` pair
fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

/// Drop or confirm hookdir scripts according to their policy
///
/// `Error` drops the script with a message, `Warn` keeps it with a warning,
/// `Interactive` asks `confirm`. Configured commands are never touched.
fn enforce_hookdir_policy<F>(hooks: &mut HookList, mut confirm: F) -> Result<()>
where
    F: FnMut(&HookSpec) -> Result<bool>,
{
    let mut refused = Vec::new();

    for hook in hooks.iter() {
        let Provenance::Hookdir(policy) = hook.provenance else {
            continue;
        };
        match policy {
            HookdirPolicy::Error => {
                eprintln!(
                    "{}: hook '{}' is in the hooks directory and will not run \
                     (hook.runHookDir=error)",
                    "error".red().bold(),
                    hook.identity
                );
                refused.push(hook.position);
            }
            HookdirPolicy::Warn => {
                eprintln!(
                    "{}: running hook '{}' from the hooks directory",
                    "warning".yellow().bold(),
                    hook.identity
                );
            }
            HookdirPolicy::Interactive => {
                if !confirm(hook)? {
                    refused.push(hook.position);
                }
            }
            HookdirPolicy::No | HookdirPolicy::Yes | HookdirPolicy::Unknown => {}
        }
    }

    if !refused.is_empty() {
        tracing::debug!(count = refused.len(), "Skipping refused hookdir hooks");
        hooks.retain(|hook| !refused.contains(&hook.position));
    }
    Ok(())
}

fn confirm_interactive(hook: &HookSpec) -> Result<bool> {
    use dialoguer::{Confirm, theme::ColorfulTheme};

    if !std::io::stdin().is_terminal() {
        eprintln!(
            "{}: not asking about hook '{}' without a terminal; skipping it",
            "warning".yellow().bold(),
            hook.identity
        );
        return Ok(false);
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Run hook '{}' from the hooks directory?",
            hook.identity
        ))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn report(aggregate: &RunAggregate) {
    for outcome in &aggregate.outcomes {
        if let HookStatus::Exited(bits) = outcome.status
            && bits != 0
        {
            tracing::warn!("hook '{}' failed with status {}", outcome.identity, bits);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use hookwise_core::ConfigScope;

    fn sample(policy: HookdirPolicy) -> HookList {
        let mut hooks = HookList::new();
        hooks.declare("/bin/lint", ConfigScope::Local);
        hooks.push_hookdir("/repo/.git/hooks/pre-commit", policy);
        hooks
    }

    fn identities(hooks: &HookList) -> Vec<&str> {
        hooks.iter().map(|h| h.identity.as_str()).collect()
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("GIT_DIR=/repo/.git").unwrap(),
            ("GIT_DIR".to_string(), "/repo/.git".to_string())
        );
        assert_eq!(
            parse_key_value("EMPTY=").unwrap(),
            ("EMPTY".to_string(), String::new())
        );
        assert_eq!(
            parse_key_value("A=b=c").unwrap(),
            ("A".to_string(), "b=c".to_string())
        );
        assert!(parse_key_value("NOVALUE").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn test_error_policy_drops_hookdir_script() {
        let mut hooks = sample(HookdirPolicy::Error);
        enforce_hookdir_policy(&mut hooks, |_| panic!("should not prompt")).unwrap();
        assert_eq!(identities(&hooks), vec!["/bin/lint"]);
    }

    #[test]
    fn test_warn_and_yes_keep_hookdir_script() {
        for policy in [HookdirPolicy::Warn, HookdirPolicy::Yes, HookdirPolicy::Unknown] {
            let mut hooks = sample(policy);
            enforce_hookdir_policy(&mut hooks, |_| panic!("should not prompt")).unwrap();
            assert_eq!(hooks.len(), 2);
        }
    }

    #[test]
    fn test_interactive_policy_asks() {
        let mut hooks = sample(HookdirPolicy::Interactive);
        let mut asked = Vec::new();
        enforce_hookdir_policy(&mut hooks, |hook| {
            asked.push(hook.identity.clone());
            Ok(false)
        })
        .unwrap();
        assert_eq!(asked, vec!["/repo/.git/hooks/pre-commit"]);
        assert_eq!(identities(&hooks), vec!["/bin/lint"]);

        let mut hooks = sample(HookdirPolicy::Interactive);
        enforce_hookdir_policy(&mut hooks, |_| Ok(true)).unwrap();
        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks.as_slice()[1].position, 1);
    }

    #[test]
    fn test_options_from_flags() {
        let command = RunCommand {
            event: "pre-push".to_string(),
            jobs: None,
            to_stdin: None,
            stdin_lines: vec!["refs/heads/main 1 refs/heads/main 2".to_string()],
            env: vec![("REMOTE".to_string(), "origin".to_string())],
            ignore_missing: true,
            run_hookdir: None,
            args: vec!["origin".to_string(), "git@example.com:repo".to_string()],
        };

        let options = command.options(3, Some(Path::new("/work")));
        assert_eq!(options.jobs, 3);
        assert!(!options.require_at_least_one);
        assert_eq!(options.args, vec!["origin", "git@example.com:repo"]);
        assert_eq!(options.env.get("REMOTE").map(String::as_str), Some("origin"));
        assert_eq!(options.dir.as_deref(), Some(Path::new("/work")));
        assert_eq!(options.stdin_lines.as_ref().map(Vec::len), Some(1));
        assert!(options.stdin_file.is_none());
        assert!(!options.consume_sideband);
    }
}
