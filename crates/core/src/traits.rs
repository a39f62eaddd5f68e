//! Core behavioral traits for hookwise components
//!
//! This module defines the configuration lookup interface the engine reads
//! from. It is implemented by the git-backed store and the in-memory store.

use crate::Result;
use serde::Serialize;
use std::fmt;

/// Configuration tier a value was read from
///
/// Variants are declared in increasing precedence, matching the order in
/// which git reads its configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    /// System-wide configuration (`/etc/gitconfig`)
    System,
    /// Per-user configuration (`~/.gitconfig`, XDG)
    Global,
    /// Repository configuration (`.git/config`)
    Local,
    /// Per-worktree configuration
    Worktree,
    /// Supplied on the command line (`-c key=value`)
    Command,
}

impl ConfigScope {
    /// Get the string name of this scope
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ConfigScope::System => "system",
            ConfigScope::Global => "global",
            ConfigScope::Local => "local",
            ConfigScope::Worktree => "worktree",
            ConfigScope::Command => "command",
        }
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single configuration value together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    /// The value; `None` for a key declared without `= value`
    pub value: Option<String>,
    /// Scope the value was read from
    pub scope: ConfigScope,
}

impl ConfigValue {
    /// Create a value with content
    pub fn new(value: impl Into<String>, scope: ConfigScope) -> Self {
        Self {
            value: Some(value.into()),
            scope,
        }
    }

    /// Create a key that is declared but carries no value
    #[must_use]
    pub fn valueless(scope: ConfigScope) -> Self {
        Self { value: None, scope }
    }

    /// Get the value if it is present and non-empty
    #[must_use]
    pub fn non_empty(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Configuration store interface
///
/// Abstracts the key/value configuration the hook engine consults.
///
/// # Examples
///
/// ```ignore
/// fn commands_for(store: &dyn ConfigStore, event: &str) -> Result<Vec<ConfigValue>> {
///     store.get_all(&format!("hook.{event}.command"))
/// }
/// ```
pub trait ConfigStore {
    /// Get every value of a multi-valued key, in declaration order
    ///
    /// Lower-precedence scopes come first. A missing key yields an empty list.
    fn get_all(&self, key: &str) -> Result<Vec<ConfigValue>>;

    /// Get the effective (highest precedence, last declared) value of a key
    fn get(&self, key: &str) -> Result<Option<ConfigValue>>;

    /// Get a boolean value using git's truthiness rules
    ///
    /// A valueless key counts as `true`.
    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(entry) = self.get(key)? else {
            return Ok(None);
        };
        let Some(value) = entry.value else {
            return Ok(Some(true));
        };
        match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Some(true)),
            "false" | "no" | "off" | "0" | "" => Ok(Some(false)),
            _ => Err(crate::Error::InvalidConfig {
                key: key.to_string(),
                message: format!("'{value}' is not a boolean"),
            }),
        }
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn get_all(&self, key: &str) -> Result<Vec<ConfigValue>> {
        (**self).get_all(key)
    }

    fn get(&self, key: &str) -> Result<Option<ConfigValue>> {
        (**self).get(key)
    }
}
