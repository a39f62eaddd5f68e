//! Git configuration store
//!
//! Reads configuration through libgit2 (`git2`), which merges the system,
//! global, XDG, repository and worktree files. Command-line overrides are
//! layered on top with [`ConfigScope::Command`].

use crate::keys;
use crate::memory::MemoryConfig;
use hookwise_core::{ConfigScope, ConfigStore, ConfigValue, Error, Result};
use std::path::{Path, PathBuf};

/// Helper function to convert git2 errors to hookwise errors
#[inline]
fn git_err(e: git2::Error) -> Error {
    Error::Config(format!("Git error: {e}"))
}

/// Missing keys, and keys libgit2 refuses to parse (a command used as an
/// alias name can contain anything), both read as absent
fn is_absent(e: &git2::Error) -> bool {
    matches!(
        e.code(),
        git2::ErrorCode::NotFound | git2::ErrorCode::InvalidSpec
    )
}

fn scope_of(level: git2::ConfigLevel) -> ConfigScope {
    match level {
        git2::ConfigLevel::ProgramData | git2::ConfigLevel::System => ConfigScope::System,
        git2::ConfigLevel::XDG | git2::ConfigLevel::Global => ConfigScope::Global,
        git2::ConfigLevel::Local => ConfigScope::Local,
        git2::ConfigLevel::App | git2::ConfigLevel::Highest => ConfigScope::Command,
        #[allow(unreachable_patterns)]
        _ => ConfigScope::Worktree,
    }
}

/// Configuration backed by git config files
pub struct GitConfigStore {
    config: git2::Config,
    overrides: MemoryConfig,
    git_dir: Option<PathBuf>,
    work_dir: Option<PathBuf>,
}

impl GitConfigStore {
    /// Discover the repository containing `start` and open its configuration
    ///
    /// Outside a repository only the system and global files are read and
    /// no git directory is recorded.
    pub fn discover(start: &Path) -> Result<Self> {
        match git2::Repository::discover(start) {
            Ok(repo) => {
                let config = repo.config().map_err(git_err)?;
                tracing::debug!(git_dir = %repo.path().display(), "Opened repository config");
                Ok(Self {
                    config,
                    overrides: MemoryConfig::new(),
                    git_dir: Some(repo.path().to_path_buf()),
                    work_dir: repo.workdir().map(Path::to_path_buf),
                })
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                tracing::debug!("Not inside a git repository, using default config");
                Self::global()
            }
            Err(e) => Err(git_err(e)),
        }
    }

    /// Open the system and global configuration only
    pub fn global() -> Result<Self> {
        Ok(Self {
            config: git2::Config::open_default().map_err(git_err)?,
            overrides: MemoryConfig::new(),
            git_dir: None,
            work_dir: None,
        })
    }

    /// Layer command-line overrides on top of the file configuration
    #[must_use]
    pub fn with_overrides(mut self, overrides: MemoryConfig) -> Self {
        self.overrides = overrides;
        self
    }

    /// The repository's git directory, if running inside one
    #[must_use]
    pub fn git_dir(&self) -> Option<&Path> {
        self.git_dir.as_deref()
    }

    /// Directory scanned for legacy hook scripts
    ///
    /// `core.hooksPath` wins when set; relative values are taken from the work
    /// tree root (or the git directory for bare repositories). Otherwise
    /// `<git-dir>/hooks`. `None` outside a repository.
    pub fn hooks_dir(&self) -> Result<Option<PathBuf>> {
        let Some(git_dir) = self.git_dir.as_deref() else {
            return Ok(None);
        };

        let configured = self.get(keys::HOOKS_PATH)?;
        let Some(raw) = configured.as_ref().and_then(ConfigValue::non_empty) else {
            return Ok(Some(git_dir.join("hooks")));
        };

        let path = expand_home(raw);
        if path.is_absolute() {
            return Ok(Some(path));
        }
        let base = self.work_dir.as_deref().unwrap_or(git_dir);
        Ok(Some(base.join(path)))
    }

    fn file_values(&self, key: &str) -> Result<Vec<ConfigValue>> {
        let mut values = Vec::new();
        let mut entries = match self.config.multivar(key, None) {
            Ok(entries) => entries,
            Err(e) if is_absent(&e) => return Ok(values),
            Err(e) => return Err(git_err(e)),
        };

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.code() == git2::ErrorCode::NotFound => break,
                Err(e) => return Err(git_err(e)),
            };
            let value = if entry.has_value() {
                entry.value().map(str::to_string)
            } else {
                None
            };
            values.push(ConfigValue {
                value,
                scope: scope_of(entry.level()),
            });
        }

        // libgit2 walks backends by priority; present them in read order
        values.sort_by_key(|v| v.scope);
        Ok(values)
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

impl ConfigStore for GitConfigStore {
    fn get_all(&self, key: &str) -> Result<Vec<ConfigValue>> {
        let mut values = self.file_values(key)?;
        values.extend(self.overrides.get_all(key)?);
        Ok(values)
    }

    fn get(&self, key: &str) -> Result<Option<ConfigValue>> {
        if let Some(value) = self.overrides.get(key)? {
            return Ok(Some(value));
        }

        match self.config.get_entry(key) {
            Ok(entry) => {
                let value = if entry.has_value() {
                    entry.value().map(str::to_string)
                } else {
                    None
                };
                Ok(Some(ConfigValue {
                    value,
                    scope: scope_of(entry.level()),
                }))
            }
            Err(e) if is_absent(&e) => Ok(None),
            Err(e) => Err(git_err(e)),
        }
    }
}
