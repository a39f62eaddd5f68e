//! One-time advisories
//!
//! A hookdir script that exists but is not executable is skipped with a
//! warning. The warning is shown once per hook name for as long as the
//! [`AdvisoryLog`] lives, no matter how many times the event is resolved.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Hook names that have already produced the "ignored hook" advisory
///
/// Created empty by the engine and dropped with it. Share one log between
/// engines with `Arc` to dedupe across them.
#[derive(Debug, Default)]
pub struct AdvisoryLog {
    shown: Mutex<HashSet<String>>,
}

impl AdvisoryLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`, returning `true` only the first time it is seen
    pub fn first_time(&self, name: &str) -> bool {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        if shown.contains(name) {
            return false;
        }
        shown.insert(name.to_string())
    }

    /// Warn that a non-executable hookdir script was ignored
    ///
    /// Returns whether the advisory was emitted.
    pub fn ignored_hook(&self, name: &str, path: &Path) -> bool {
        if !self.first_time(name) {
            return false;
        }
        tracing::warn!(
            path = %path.display(),
            "The '{name}' hook was ignored because it's not set as executable. \
             You can disable this warning with `git config advice.ignoredHook false`."
        );
        true
    }

    /// Number of distinct hook names advised about
    #[must_use]
    pub fn len(&self) -> usize {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if no advisory has been shown
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
