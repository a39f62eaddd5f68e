//! Configuration access for hookwise
//!
//! This crate handles:
//! - Git configuration lookup (via libgit2) with scope metadata
//! - In-memory configuration for command-line overrides and tests
//! - Configuration key construction
//! - Logging initialization

pub mod git;
pub mod keys;
pub mod logging;
pub mod memory;

// Re-export error types from core
pub use hookwise_core::{Error, Result};

// Re-export main types
pub use git::GitConfigStore;
pub use memory::MemoryConfig;
