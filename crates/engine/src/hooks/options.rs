//! Run options
//!
//! Configuration surface for one `run_all` call, built with chained setters
//! in the same style as the runner builders elsewhere in the engine.

use hookwise_core::{Error, Result};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Where a hook's stdin comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinSource<'a> {
    /// No stdin
    Null,
    /// Redirected from a file, opened fresh for every hook
    File(&'a Path),
    /// Fed line by line through a pipe
    Lines(&'a [String]),
}

/// Options for running the hooks of one event
///
/// # Examples
///
/// ```ignore
/// let options = RunOptions::new()
///     .jobs(4)
///     .arg("origin")
///     .stdin_lines(vec!["refs/heads/main 1234 refs/heads/main 5678".into()])
///     .require_at_least_one(true);
/// ```
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Number of hooks allowed to run at the same time
    pub jobs: usize,

    /// File redirected to every hook's stdin
    pub stdin_file: Option<PathBuf>,

    /// Lines streamed to every hook's stdin
    pub stdin_lines: Option<Vec<String>>,

    /// Arguments appended verbatim after the hook command
    pub args: Vec<String>,

    /// Environment variables added to the inherited environment
    pub env: IndexMap<String, String>,

    /// Working directory for the hooks (default: current directory)
    pub dir: Option<PathBuf>,

    /// Fail instead of succeeding trivially when no hooks resolve
    pub require_at_least_one: bool,

    /// Whether the caller demultiplexes sideband framing in hook output
    ///
    /// Carried for the caller's display layer; the runner does not read it.
    /// Only library callers set it. The `hookwise run` front end prints hook
    /// output as-is and always leaves it off.
    pub consume_sideband: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            stdin_file: None,
            stdin_lines: None,
            args: Vec::new(),
            env: IndexMap::new(),
            dir: None,
            require_at_least_one: false,
            consume_sideband: false,
        }
    }
}

impl RunOptions {
    /// Create options with defaults (one job, no stdin)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker count (0 is treated as 1)
    #[must_use]
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Redirect stdin of every hook from `path`
    #[must_use]
    pub fn stdin_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin_file = Some(path.into());
        self
    }

    /// Stream `lines` to the stdin of every hook
    #[must_use]
    pub fn stdin_lines(mut self, lines: Vec<String>) -> Self {
        self.stdin_lines = Some(lines);
        self
    }

    /// Append an argument passed to every hook
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments passed to every hook
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add an environment variable for every hook
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Run hooks from `dir`
    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Require at least one hook to resolve
    #[must_use]
    pub fn require_at_least_one(mut self, required: bool) -> Self {
        self.require_at_least_one = required;
        self
    }

    /// Set the sideband pass-through flag
    #[must_use]
    pub fn consume_sideband(mut self, consume: bool) -> Self {
        self.consume_sideband = consume;
        self
    }

    /// Effective worker count
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.jobs.max(1)
    }

    /// Validate the stdin configuration and return the source to use
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConflictingStdin`] when both a file and lines are set.
    pub fn stdin_source(&self) -> Result<StdinSource<'_>> {
        match (&self.stdin_file, &self.stdin_lines) {
            (Some(_), Some(_)) => Err(Error::ConflictingStdin),
            (Some(path), None) => Ok(StdinSource::File(path)),
            (None, Some(lines)) => Ok(StdinSource::Lines(lines)),
            (None, None) => Ok(StdinSource::Null),
        }
    }
}
