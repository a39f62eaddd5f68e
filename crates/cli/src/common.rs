//! Common types shared across CLI commands

use anyhow::{Context, Result};
use hookwise_config::MemoryConfig;
use hookwise_engine::{HookEngine, HookdirPolicy};
use std::path::{Path, PathBuf};

/// State shared by every command
///
/// Built once per invocation after the command line has been parsed.
pub struct RuntimeContext {
    /// Hook engine for the repository containing `work_dir`
    pub engine: HookEngine,

    /// Directory given with `-C`, used as the hooks' working directory
    pub work_dir: Option<PathBuf>,
}

impl RuntimeContext {
    /// Open the repository containing `work_dir` (or the current directory)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A `-c` assignment is malformed
    /// - The current directory cannot be determined
    /// - The git configuration cannot be opened
    pub fn new(
        work_dir: Option<&Path>,
        assignments: &[String],
        hookdir_policy: Option<HookdirPolicy>,
    ) -> Result<Self> {
        let overrides =
            MemoryConfig::from_assignments(assignments).context("Invalid -c assignment")?;

        let start = match work_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };

        let engine = HookEngine::discover(&start, overrides)
            .with_context(|| format!("Failed to open git configuration from {}", start.display()))?
            .with_hookdir_policy(hookdir_policy);

        Ok(Self {
            engine,
            work_dir: work_dir.map(Path::to_path_buf),
        })
    }
}
