//! Hookdir policy
//!
//! Governs whether scripts in the legacy hooks directory take part in a run,
//! and how they are annotated when listed.

use hookwise_config::keys;
use hookwise_core::{ConfigStore, Error, Result};
use std::fmt;
use std::str::FromStr;

/// Policy for scripts found in the legacy hooks directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HookdirPolicy {
    /// Never run hookdir scripts
    No,
    /// Refuse to run hookdir scripts, reporting an error
    Error,
    /// Run hookdir scripts after printing a warning
    Warn,
    /// Ask before running each hookdir script
    Interactive,
    /// Run hookdir scripts
    Yes,
    /// Nothing configured; behaves like [`HookdirPolicy::Yes`]
    #[default]
    Unknown,
}

impl HookdirPolicy {
    /// Pick the effective policy
    ///
    /// An explicit per-invocation value wins over the configured value; with
    /// neither the policy is [`HookdirPolicy::Unknown`].
    #[must_use]
    pub fn resolve(explicit: Option<Self>, configured: Option<Self>) -> Self {
        explicit.or(configured).unwrap_or_default()
    }

    /// Read `hook.runHookDir` from configuration
    pub fn from_config(config: &dyn ConfigStore) -> Result<Option<Self>> {
        let Some(entry) = config.get(keys::RUN_HOOKDIR)? else {
            return Ok(None);
        };
        let value = entry.value.unwrap_or_default();
        value.parse().map(Some)
    }

    /// Check if hookdir scripts may be included at all
    #[must_use]
    pub fn allows_hookdir(&self) -> bool {
        !matches!(self, HookdirPolicy::No)
    }

    /// Qualifier shown next to hookdir scripts
    #[must_use]
    pub fn annotation(&self) -> Option<&'static str> {
        match self {
            HookdirPolicy::Error => Some("will error and not run"),
            HookdirPolicy::Interactive => Some("will prompt"),
            HookdirPolicy::Warn => Some("will warn but run"),
            HookdirPolicy::No | HookdirPolicy::Yes | HookdirPolicy::Unknown => None,
        }
    }

    /// Get the string name of this policy
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            HookdirPolicy::No => "no",
            HookdirPolicy::Error => "error",
            HookdirPolicy::Warn => "warn",
            HookdirPolicy::Interactive => "interactive",
            HookdirPolicy::Yes => "yes",
            HookdirPolicy::Unknown => "unknown",
        }
    }
}

impl FromStr for HookdirPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yes" => Ok(HookdirPolicy::Yes),
            "no" => Ok(HookdirPolicy::No),
            "warn" => Ok(HookdirPolicy::Warn),
            "error" => Ok(HookdirPolicy::Error),
            "interactive" => Ok(HookdirPolicy::Interactive),
            _ => Err(Error::InvalidHookdirPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HookdirPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
