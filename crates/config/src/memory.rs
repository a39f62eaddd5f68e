//! In-memory configuration store
//!
//! Holds `key=value` pairs in declaration order. Used for command-line
//! overrides layered on top of git config, and as a test double.

use crate::keys;
use hookwise_core::{ConfigScope, ConfigStore, ConfigValue, Error, Result};

/// Ordered list of configuration entries
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    entries: Vec<(String, ConfigValue)>,
}

impl MemoryConfig {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `key`
    pub fn add(&mut self, key: &str, value: impl Into<String>, scope: ConfigScope) -> &mut Self {
        self.entries
            .push((keys::normalize(key), ConfigValue::new(value, scope)));
        self
    }

    /// Append a declaration of `key` that carries no value
    pub fn add_valueless(&mut self, key: &str, scope: ConfigScope) -> &mut Self {
        self.entries
            .push((keys::normalize(key), ConfigValue::valueless(scope)));
        self
    }

    /// Builder-style variant of [`MemoryConfig::add`]
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>, scope: ConfigScope) -> Self {
        self.add(key, value, scope);
        self
    }

    /// Parse command-line assignments (`key=value`, or a bare `key`)
    ///
    /// All parsed values get [`ConfigScope::Command`].
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            match assignment.split_once('=') {
                Some((key, value)) => {
                    validate_key(key)?;
                    config.add(key, value, ConfigScope::Command);
                }
                None => {
                    validate_key(assignment)?;
                    config.add_valueless(assignment, ConfigScope::Command);
                }
            }
        }
        Ok(config)
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = key.find('.').is_some_and(|dot| dot > 0) && !key.ends_with('.');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            key: key.to_string(),
            message: "key must look like <section>.<name>".to_string(),
        })
    }
}

impl ConfigStore for MemoryConfig {
    fn get_all(&self, key: &str) -> Result<Vec<ConfigValue>> {
        let key = keys::normalize(key);
        Ok(self
            .entries
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn get(&self, key: &str) -> Result<Option<ConfigValue>> {
        let key = keys::normalize(key);
        Ok(self
            .entries
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_get_all_preserves_order() {
        let config = MemoryConfig::new()
            .with("hook.pre-commit.command", "a", ConfigScope::Global)
            .with("hook.pre-commit.command", "b", ConfigScope::Local)
            .with("hook.post-commit.command", "c", ConfigScope::Local);

        let values = config.get_all("hook.pre-commit.command").unwrap();
        assert_eq!(
            values,
            vec![
                ConfigValue::new("a", ConfigScope::Global),
                ConfigValue::new("b", ConfigScope::Local),
            ]
        );
    }

    #[test]
    fn test_get_returns_last_declaration() {
        let config = MemoryConfig::new()
            .with("hook.runHookDir", "no", ConfigScope::Global)
            .with("HOOK.RUNHOOKDIR", "warn", ConfigScope::Local);

        let value = config.get("hook.runhookdir").unwrap().unwrap();
        assert_eq!(value.value.as_deref(), Some("warn"));
        assert_eq!(value.scope, ConfigScope::Local);
    }

    #[test]
    fn test_missing_key() {
        let config = MemoryConfig::new();
        assert!(config.get("hook.jobs").unwrap().is_none());
        assert!(config.get_all("hook.x.command").unwrap().is_empty());
    }

    #[test]
    fn test_from_assignments() {
        let config =
            MemoryConfig::from_assignments(["hook.jobs=4", "advice.ignoredHook"]).unwrap();

        let jobs = config.get("hook.jobs").unwrap().unwrap();
        assert_eq!(jobs, ConfigValue::new("4", ConfigScope::Command));

        let advice = config.get("advice.ignoredhook").unwrap().unwrap();
        assert_eq!(advice.value, None);
    }

    #[test]
    fn test_from_assignments_rejects_bad_key() {
        assert!(MemoryConfig::from_assignments(["nodot=1"]).is_err());
        assert!(MemoryConfig::from_assignments([".x=1"]).is_err());
    }
}
