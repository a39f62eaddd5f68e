//! Hook resolution and execution
//!
//! ## Execution Model
//!
//! - An event name resolves to an ordered [`HookList`]: configured commands
//!   first (in configuration read order, later re-declarations moving to the
//!   tail), then the legacy hookdir script when the policy allows it
//! - The list is drained by a pool of `jobs` workers pulling from a shared
//!   cursor, so hooks start in list order
//! - Every hook runs regardless of earlier failures; results are OR-ed into a
//!   [`RunAggregate`]
//!
//! ## Module Organization
//!
//! - `spec`: resolved hook structures (`HookSpec`, `HookList`, `HookListing`)
//! - `policy`: hookdir policy parsing and precedence
//! - `advice`: one-time advisories for ignored scripts
//! - `resolver`: event name to hook list
//! - `options`: per-run options
//! - `feed`: streamed stdin delivery
//! - `runner`: parallel execution and aggregation

pub mod advice;
pub mod feed;
pub mod options;
pub mod policy;
pub mod resolver;
pub mod runner;
pub mod spec;

// Re-export main types for convenience
pub use advice::AdvisoryLog;
pub use feed::{Feed, StreamCursor};
pub use options::{RunOptions, StdinSource};
pub use policy::HookdirPolicy;
pub use resolver::Resolver;
pub use runner::{HookOutcome, HookStatus, RunAggregate, Runner};
pub use spec::{HookList, HookListing, HookSpec, Provenance};
