//! Parallel hook runner
//!
//! Drains a [`HookList`] through a bounded pool of workers. Workers pull the
//! next hook from one shared cursor, so hooks are handed out strictly in list
//! order; with more than one job they may finish in any order. Each worker
//! reports a typed [`HookOutcome`] over a channel and a single aggregation
//! step folds them into the [`RunAggregate`].

use super::feed::{self, StreamCursor};
use super::options::{RunOptions, StdinSource};
use super::spec::{HookList, HookSpec};
use hookwise_core::{Error, Result};
use std::fs::File;
use std::process::ExitStatus;
use std::sync::{Mutex, PoisonError, mpsc};
use std::time::Instant;

/// How a single hook ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookStatus {
    /// The hook ran to completion; carries its exit-derived result bits
    Exited(i32),
    /// The process could not be started
    SpawnFailed(String),
    /// The process started but its exit status could not be collected
    WaitFailed(String),
}

/// Completion report for one hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutcome {
    /// Position of the hook in the resolved list
    pub position: usize,
    /// Command or script that ran
    pub identity: String,
    /// How it ended
    pub status: HookStatus,
}

impl HookOutcome {
    /// Bits this hook contributes to the aggregate result
    #[must_use]
    pub fn result_bits(&self) -> i32 {
        match self.status {
            HookStatus::Exited(bits) => bits,
            HookStatus::SpawnFailed(_) | HookStatus::WaitFailed(_) => 1,
        }
    }

    /// Check if the hook started and ran to completion
    #[must_use]
    pub fn completed(&self) -> bool {
        matches!(self.status, HookStatus::Exited(_))
    }
}

/// Combined result of running every hook for one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunAggregate {
    /// Bitwise OR of every hook's result bits
    pub result_bits: i32,

    /// At least one hook started and ran to completion
    pub invoked: bool,

    /// Per-hook outcomes, in completion order
    pub outcomes: Vec<HookOutcome>,
}

impl RunAggregate {
    /// Fold one hook outcome into the aggregate
    pub fn record(&mut self, outcome: HookOutcome) {
        self.result_bits |= outcome.result_bits();
        self.invoked |= outcome.completed();
        self.outcomes.push(outcome);
    }

    /// Check if every hook succeeded (trivially true when none ran)
    #[must_use]
    pub fn success(&self) -> bool {
        self.result_bits == 0
    }
}

/// Shared pull cursor over the resolved hooks
struct HookCursor<'a> {
    hooks: &'a [HookSpec],
    next: Mutex<usize>,
}

impl<'a> HookCursor<'a> {
    fn new(hooks: &'a [HookSpec]) -> Self {
        Self {
            hooks,
            next: Mutex::new(0),
        }
    }

    /// Hand out the next hook; taking it and advancing happen under one lock
    fn next(&self) -> Option<&'a HookSpec> {
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let hook = self.hooks.get(*next)?;
        *next += 1;
        Some(hook)
    }
}

/// Runs a resolved hook list with the given options
///
/// # Examples
///
/// ```ignore
/// let hooks = engine.resolve("pre-push")?;
/// let options = RunOptions::new().jobs(2).arg("origin");
/// let aggregate = Runner::new("pre-push", &options).run(&hooks)?;
/// if !aggregate.success() {
///     std::process::exit(aggregate.result_bits);
/// }
/// ```
pub struct Runner<'a> {
    event: &'a str,
    options: &'a RunOptions,
}

impl<'a> Runner<'a> {
    /// Create a runner for `event`
    #[must_use]
    pub fn new(event: &'a str, options: &'a RunOptions) -> Self {
        Self { event, options }
    }

    /// Check the options contract before anything is spawned
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConflictingStdin`] when both stdin sources are set.
    pub fn validate(&self) -> Result<()> {
        self.options.stdin_source().map(|_| ())
    }

    /// Run every hook in `hooks`
    ///
    /// Spawn failures and non-zero exits are recorded in the aggregate and
    /// never stop the remaining hooks.
    ///
    /// # Errors
    ///
    /// Fails before spawning anything when both stdin sources are set, or when
    /// `require_at_least_one` is set and `hooks` is empty.
    #[tracing::instrument(skip(self, hooks), fields(event = %self.event, hook_count = hooks.len()))]
    pub fn run(&self, hooks: &HookList) -> Result<RunAggregate> {
        let stdin = self.options.stdin_source()?;

        if hooks.is_empty() {
            if self.options.require_at_least_one {
                return Err(Error::NoHooks {
                    event: self.event.to_string(),
                });
            }
            tracing::debug!("No hooks to run");
            return Ok(RunAggregate::default());
        }

        let workers = self.options.worker_count().min(hooks.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("hookwise-job-{i}"))
            .build()
            .map_err(|e| Error::HookExecution(format!("Failed to start worker pool: {e}")))?;

        tracing::debug!(workers, "Running hooks");

        let cursor = HookCursor::new(hooks.as_slice());
        let options = self.options;
        let (sender, receiver) = mpsc::channel();

        pool.scope(|scope| {
            for _ in 0..workers {
                let sender = sender.clone();
                let cursor = &cursor;
                scope.spawn(move |_| {
                    while let Some(hook) = cursor.next() {
                        if sender.send(run_hook(hook, stdin, options)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(sender);

        let mut aggregate = RunAggregate::default();
        for outcome in receiver {
            aggregate.record(outcome);
        }

        tracing::debug!(
            result_bits = aggregate.result_bits,
            invoked = aggregate.invoked,
            "Hooks finished"
        );
        Ok(aggregate)
    }
}

fn run_hook(hook: &HookSpec, stdin: StdinSource<'_>, options: &RunOptions) -> HookOutcome {
    let span = tracing::info_span!(
        "hook_execution",
        hook = %hook.identity,
        position = hook.position,
        origin = hook.provenance.label()
    );
    let _guard = span.enter();

    let start = Instant::now();
    tracing::debug!("Starting hook");

    let status = execute(hook, stdin, options);

    let elapsed = start.elapsed();
    match &status {
        HookStatus::Exited(0) => {
            tracing::debug!(elapsed_ms = elapsed.as_millis(), "Hook completed successfully");
        }
        HookStatus::Exited(bits) => {
            tracing::debug!(elapsed_ms = elapsed.as_millis(), bits, "Hook failed");
        }
        HookStatus::SpawnFailed(reason) => {
            tracing::error!("cannot run hook '{}': {}", hook.identity, reason);
        }
        HookStatus::WaitFailed(reason) => {
            tracing::error!("lost track of hook '{}': {}", hook.identity, reason);
        }
    }

    HookOutcome {
        position: hook.position,
        identity: hook.identity.clone(),
        status,
    }
}

fn execute(hook: &HookSpec, stdin: StdinSource<'_>, options: &RunOptions) -> HookStatus {
    // argv is the identity followed by the caller's arguments, no shell
    let mut expression = duct::cmd(&hook.program, &options.args)
        .stdout_to_stderr()
        .unchecked();

    if let Some(dir) = &options.dir {
        expression = expression.dir(dir.as_path());
    }
    for (key, value) in &options.env {
        expression = expression.env(key, value);
    }

    let mut feed = None;
    expression = match stdin {
        StdinSource::Null => expression.stdin_null(),
        StdinSource::File(path) => match File::open(path) {
            Ok(file) => expression.stdin_file(file),
            Err(e) => {
                return HookStatus::SpawnFailed(format!(
                    "cannot open stdin file {}: {e}",
                    path.display()
                ));
            }
        },
        StdinSource::Lines(lines) => match os_pipe::pipe() {
            Ok((reader, writer)) => {
                feed = Some((StreamCursor::new(lines), writer));
                expression.stdin_file(reader)
            }
            Err(e) => return HookStatus::SpawnFailed(format!("cannot create stdin pipe: {e}")),
        },
    };

    let started = expression.start();
    // The expression owns our copy of the pipe's read end; close it so a hook
    // that exits early turns further writes into a broken pipe.
    drop(expression);
    let handle = match started {
        Ok(handle) => handle,
        Err(e) => return HookStatus::SpawnFailed(e.to_string()),
    };

    if let Some((cursor, writer)) = feed {
        match feed::drive(cursor, writer) {
            Ok(lines) => tracing::trace!(lines, "Fed hook stdin"),
            Err(e) => tracing::warn!(error = %e, "Failed to feed hook stdin"),
        }
    }

    match handle.wait() {
        Ok(output) => HookStatus::Exited(exit_bits(output.status)),
        Err(e) => HookStatus::WaitFailed(e.to_string()),
    }
}

/// Result bits for an exit status: the exit code, or 128 + signal
fn exit_bits(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
