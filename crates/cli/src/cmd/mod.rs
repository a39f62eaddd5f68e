//! CLI command implementations
//!
//! This module contains all command implementations for the hookwise CLI.

pub mod list;
pub mod run;
