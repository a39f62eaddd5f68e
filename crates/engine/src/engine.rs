//! Hook engine facade
//!
//! Ties a configuration store, the hooks directory and the advisory log
//! together behind the three operations callers need: resolve, list, run.

use crate::hooks::{
    AdvisoryLog, HookList, HookListing, HookdirPolicy, Resolver, RunAggregate, RunOptions, Runner,
};
use hookwise_config::{GitConfigStore, MemoryConfig, keys};
use hookwise_core::{ConfigStore, Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolves and runs the hooks configured for git events
///
/// # Examples
///
/// ```ignore
/// let engine = HookEngine::discover(Path::new("."), MemoryConfig::new())?;
/// let options = RunOptions::new().arg("origin").require_at_least_one(false);
/// let aggregate = engine.run_all("pre-push", &options)?;
/// ```
pub struct HookEngine<C: ConfigStore = GitConfigStore> {
    config: C,
    hooks_dir: Option<PathBuf>,
    policy_override: Option<HookdirPolicy>,
    advice: Arc<AdvisoryLog>,
}

impl<C: ConfigStore> HookEngine<C> {
    /// Create an engine over `config`
    ///
    /// `hooks_dir` is the legacy hooks directory, or `None` when there is no
    /// git directory context.
    pub fn new(config: C, hooks_dir: Option<PathBuf>) -> Self {
        Self {
            config,
            hooks_dir,
            policy_override: None,
            advice: Arc::new(AdvisoryLog::new()),
        }
    }

    /// Force a hookdir policy for this engine, ignoring `hook.runHookDir`
    #[must_use]
    pub fn with_hookdir_policy(mut self, policy: Option<HookdirPolicy>) -> Self {
        self.policy_override = policy;
        self
    }

    /// Share an advisory log with other engines
    #[must_use]
    pub fn with_advisory_log(mut self, advice: Arc<AdvisoryLog>) -> Self {
        self.advice = advice;
        self
    }

    /// The configuration store
    pub fn config(&self) -> &C {
        &self.config
    }

    /// The legacy hooks directory, if any
    pub fn hooks_dir(&self) -> Option<&Path> {
        self.hooks_dir.as_deref()
    }

    /// Advisories emitted so far
    pub fn advisories(&self) -> &AdvisoryLog {
        &self.advice
    }

    /// Effective hookdir policy
    ///
    /// # Errors
    ///
    /// Fails when `hook.runHookDir` holds an unknown value and no override is
    /// set.
    pub fn hookdir_policy(&self) -> Result<HookdirPolicy> {
        if self.policy_override.is_some() {
            return Ok(HookdirPolicy::resolve(self.policy_override, None));
        }
        let configured = HookdirPolicy::from_config(&self.config)?;
        Ok(HookdirPolicy::resolve(None, configured))
    }

    /// Worker count configured with `hook.jobs`
    ///
    /// # Errors
    ///
    /// Fails when the value is not a non-negative integer.
    pub fn default_jobs(&self) -> Result<Option<usize>> {
        let Some(entry) = self.config.get(keys::JOBS)? else {
            return Ok(None);
        };
        let raw = entry.non_empty().unwrap_or_default();
        raw.trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::InvalidConfig {
                key: keys::JOBS.to_string(),
                message: format!("'{raw}' is not a job count: {e}"),
            })
    }

    /// Resolve the ordered hook list for `event`
    ///
    /// # Errors
    ///
    /// Fails on unresolvable aliases, an invalid policy value, or when the
    /// configuration cannot be read.
    pub fn resolve(&self, event: &str) -> Result<HookList> {
        let policy = self.hookdir_policy()?;
        Resolver::new(&self.config, self.hooks_dir(), policy, &self.advice).resolve(event)
    }

    /// Display view of the hooks for `event`
    ///
    /// # Errors
    ///
    /// Same as [`HookEngine::resolve`].
    pub fn list(&self, event: &str) -> Result<Vec<HookListing>> {
        Ok(self.resolve(event)?.listings())
    }

    /// Resolve and run every hook for `event`
    ///
    /// The stdin contract is checked before resolution, so a bad call never
    /// reads configuration or spawns anything.
    ///
    /// # Errors
    ///
    /// Fails on contract violations (both stdin sources, or no hooks with
    /// `require_at_least_one`) and resolution errors. Hook failures are
    /// reported in the returned aggregate instead.
    #[tracing::instrument(skip(self, options), fields(jobs = options.worker_count()))]
    pub fn run_all(&self, event: &str, options: &RunOptions) -> Result<RunAggregate> {
        let runner = Runner::new(event, options);
        runner.validate()?;
        let hooks = self.resolve(event)?;
        runner.run(&hooks)
    }
}

impl HookEngine<GitConfigStore> {
    /// Open the repository containing `start`, layering `overrides` on its
    /// configuration
    ///
    /// # Errors
    ///
    /// Fails when the git configuration cannot be opened.
    pub fn discover(start: &Path, overrides: MemoryConfig) -> Result<Self> {
        let config = GitConfigStore::discover(start)?.with_overrides(overrides);
        let hooks_dir = config.hooks_dir()?;
        tracing::debug!(hooks_dir = ?hooks_dir, "Hook engine ready");
        Ok(Self::new(config, hooks_dir))
    }
}
