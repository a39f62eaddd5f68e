//! Hook resolution
//!
//! Turns an event name into an ordered [`HookList`] by reading
//! `hook.<event>.command`, following `hookcmd.<name>.command` aliases, and
//! appending the legacy hookdir script when the policy allows it.

use super::advice::AdvisoryLog;
use super::policy::HookdirPolicy;
use super::spec::HookList;
use hookwise_config::keys;
use hookwise_core::platform::{self, Probe};
use hookwise_core::{ConfigStore, Error, Result};
use std::path::Path;

/// Resolves hook lists from configuration and the hooks directory
///
/// Resolution only reads configuration and file metadata; it never starts a
/// process.
pub struct Resolver<'a, C: ConfigStore + ?Sized> {
    config: &'a C,
    hooks_dir: Option<&'a Path>,
    policy: HookdirPolicy,
    advice: &'a AdvisoryLog,
}

impl<'a, C: ConfigStore + ?Sized> Resolver<'a, C> {
    /// Create a resolver
    ///
    /// `hooks_dir` is `None` when there is no git directory; hookdir scripts
    /// are then never considered.
    pub fn new(
        config: &'a C,
        hooks_dir: Option<&'a Path>,
        policy: HookdirPolicy,
        advice: &'a AdvisoryLog,
    ) -> Self {
        Self {
            config,
            hooks_dir,
            policy,
            advice,
        }
    }

    /// Resolve the ordered hook list for `event`
    ///
    /// # Errors
    ///
    /// Fails as a whole with [`Error::UnresolvedAlias`] when any command names
    /// a `hookcmd` alias that is declared without a command.
    #[tracing::instrument(skip(self), fields(policy = %self.policy))]
    pub fn resolve(&self, event: &str) -> Result<HookList> {
        let mut hooks = HookList::new();

        for declared in self.config.get_all(&keys::hook_command(event))? {
            let Some(literal) = declared.value else {
                tracing::debug!(scope = %declared.scope, "Skipping valueless hook command");
                continue;
            };

            let command = match self.config.get(&keys::hookcmd_command(&literal))? {
                None => literal,
                Some(alias) => match alias.non_empty() {
                    Some(target) => {
                        tracing::debug!(alias = %literal, target, "Resolved hookcmd alias");
                        target.to_string()
                    }
                    None => {
                        return Err(Error::UnresolvedAlias {
                            event: event.to_string(),
                            alias: literal,
                        });
                    }
                },
            };

            hooks.declare(command, declared.scope);
        }

        if let Some(hooks_dir) = self.hooks_dir
            && self.policy.allows_hookdir()
        {
            self.add_hookdir_script(event, hooks_dir, &mut hooks)?;
        }

        tracing::debug!(hook_count = hooks.len(), "Resolved hooks");
        Ok(hooks)
    }

    fn add_hookdir_script(&self, event: &str, hooks_dir: &Path, hooks: &mut HookList) -> Result<()> {
        match platform::probe_executable(&hooks_dir.join(event)) {
            Probe::Missing => {}
            Probe::Executable(path) => {
                hooks.push_hookdir(path, self.policy);
            }
            Probe::NotExecutable(path) => {
                let enabled = self
                    .config
                    .get_bool(keys::ADVICE_IGNORED_HOOK)?
                    .unwrap_or(true);
                if enabled {
                    self.advice.ignored_hook(event, &path);
                } else {
                    tracing::debug!(path = %path.display(), "Ignoring non-executable hook");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::hooks::spec::Provenance;
    use hookwise_config::MemoryConfig;
    use hookwise_core::ConfigScope;
    use std::fs;
    use tempfile::TempDir;

    fn identities(list: &HookList) -> Vec<&str> {
        list.iter().map(|h| h.identity.as_str()).collect()
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, mode: u32) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_no_commands_configured() {
        let config = MemoryConfig::new();
        let advice = AdvisoryLog::new();
        let resolver = Resolver::new(&config, None, HookdirPolicy::Unknown, &advice);

        assert!(resolver.resolve("pre-commit").unwrap().is_empty());
    }

    #[test]
    fn test_alias_indirection() {
        let config = MemoryConfig::new()
            .with("hook.pre-commit.command", "/bin/a", ConfigScope::Global)
            .with("hook.pre-commit.command", "lint", ConfigScope::Local)
            .with("hookcmd.lint.command", "/path/b.sh", ConfigScope::Global);
        let advice = AdvisoryLog::new();
        let resolver = Resolver::new(&config, None, HookdirPolicy::Unknown, &advice);

        let hooks = resolver.resolve("pre-commit").unwrap();
        assert_eq!(identities(&hooks), vec!["/bin/a", "/path/b.sh"]);
        assert_eq!(
            hooks.as_slice()[1].provenance,
            Provenance::Config(ConfigScope::Local)
        );
    }

    #[test]
    fn test_redeclaration_in_later_scope_wins_position() {
        let config = MemoryConfig::new()
            .with("hook.pre-commit.command", "/bin/a", ConfigScope::Global)
            .with("hook.pre-commit.command", "/bin/b", ConfigScope::Global)
            .with("hook.pre-commit.command", "/bin/a", ConfigScope::Local);
        let advice = AdvisoryLog::new();
        let resolver = Resolver::new(&config, None, HookdirPolicy::Unknown, &advice);

        let hooks = resolver.resolve("pre-commit").unwrap();
        assert_eq!(identities(&hooks), vec!["/bin/b", "/bin/a"]);
        let a = &hooks.as_slice()[1];
        assert_eq!(a.position, 1);
        assert_eq!(a.provenance, Provenance::Config(ConfigScope::Local));
    }

    #[test]
    fn test_alias_and_literal_collapse_by_resolved_identity() {
        let config = MemoryConfig::new()
            .with("hook.pre-push.command", "/path/b.sh", ConfigScope::Global)
            .with("hook.pre-push.command", "/bin/x", ConfigScope::Global)
            .with("hook.pre-push.command", "b", ConfigScope::Local)
            .with("hookcmd.b.command", "/path/b.sh", ConfigScope::Global);
        let advice = AdvisoryLog::new();
        let resolver = Resolver::new(&config, None, HookdirPolicy::Unknown, &advice);

        let hooks = resolver.resolve("pre-push").unwrap();
        assert_eq!(identities(&hooks), vec!["/bin/x", "/path/b.sh"]);
    }

    #[test]
    fn test_empty_alias_fails_whole_resolution() {
        let mut config = MemoryConfig::new()
            .with("hook.pre-commit.command", "/bin/a", ConfigScope::Global)
            .with("hook.pre-commit.command", "broken", ConfigScope::Global);
        config.add_valueless("hookcmd.broken.command", ConfigScope::Global);
        let advice = AdvisoryLog::new();
        let resolver = Resolver::new(&config, None, HookdirPolicy::Unknown, &advice);

        let err = resolver.resolve("pre-commit").unwrap_err();
        match err {
            Error::UnresolvedAlias { event, alias } => {
                assert_eq!(event, "pre-commit");
                assert_eq!(alias, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_string_alias_also_fails() {
        let config = MemoryConfig::new()
            .with("hook.pre-commit.command", "broken", ConfigScope::Global)
            .with("hookcmd.broken.command", "", ConfigScope::Local);
        let advice = AdvisoryLog::new();
        let resolver = Resolver::new(&config, None, HookdirPolicy::Unknown, &advice);

        assert!(resolver.resolve("pre-commit").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_hookdir_script_appended_last() {
        let temp = TempDir::new().unwrap();
        let hooks_dir = temp.path().join("hooks");
        let script = write_script(&hooks_dir, "pre-commit", 0o755);

        let config = MemoryConfig::new().with("hook.pre-commit.command", "/bin/a", ConfigScope::Local);
        let advice = AdvisoryLog::new();
        let resolver = Resolver::new(&config, Some(hooks_dir.as_path()), HookdirPolicy::Warn, &advice);

        let hooks = resolver.resolve("pre-commit").unwrap();
        assert_eq!(hooks.len(), 2);
        let last = &hooks.as_slice()[1];
        assert_eq!(last.identity, script.to_string_lossy());
        assert_eq!(last.provenance, Provenance::Hookdir(HookdirPolicy::Warn));
        assert_eq!(last.provenance.annotation(), Some("will warn but run"));
    }

    #[cfg(unix)]
    #[test]
    fn test_hookdir_inclusion_conditions() {
        let temp = TempDir::new().unwrap();
        let hooks_dir = temp.path().join("hooks");
        write_script(&hooks_dir, "pre-commit", 0o755);
        let config = MemoryConfig::new();
        let advice = AdvisoryLog::new();

        // policy NO suppresses the script
        let resolver = Resolver::new(&config, Some(hooks_dir.as_path()), HookdirPolicy::No, &advice);
        assert!(resolver.resolve("pre-commit").unwrap().is_empty());

        // no git directory context
        let resolver = Resolver::new(&config, None, HookdirPolicy::Yes, &advice);
        assert!(resolver.resolve("pre-commit").unwrap().is_empty());

        // every other policy includes it
        for policy in [
            HookdirPolicy::Error,
            HookdirPolicy::Warn,
            HookdirPolicy::Interactive,
            HookdirPolicy::Yes,
            HookdirPolicy::Unknown,
        ] {
            let resolver = Resolver::new(&config, Some(hooks_dir.as_path()), policy, &advice);
            assert_eq!(resolver.resolve("pre-commit").unwrap().len(), 1);
        }

        // missing script for another event
        let resolver = Resolver::new(&config, Some(hooks_dir.as_path()), HookdirPolicy::Yes, &advice);
        assert!(resolver.resolve("post-merge").unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_script_advised_once() {
        let temp = TempDir::new().unwrap();
        let hooks_dir = temp.path().join("hooks");
        write_script(&hooks_dir, "pre-commit", 0o644);
        let config = MemoryConfig::new();
        let advice = AdvisoryLog::new();
        let resolver = Resolver::new(&config, Some(hooks_dir.as_path()), HookdirPolicy::Yes, &advice);

        assert!(resolver.resolve("pre-commit").unwrap().is_empty());
        assert!(resolver.resolve("pre-commit").unwrap().is_empty());
        assert_eq!(advice.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_advice_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        let hooks_dir = temp.path().join("hooks");
        write_script(&hooks_dir, "pre-commit", 0o644);
        let config = MemoryConfig::new().with("advice.ignoredHook", "false", ConfigScope::Global);
        let advice = AdvisoryLog::new();
        let resolver = Resolver::new(&config, Some(hooks_dir.as_path()), HookdirPolicy::Yes, &advice);

        assert!(resolver.resolve("pre-commit").unwrap().is_empty());
        assert!(advice.is_empty());
    }
}
