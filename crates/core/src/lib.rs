//! Core types and utilities for hookwise
//!
//! This is the foundation crate (Layer 0) that all other hookwise crates depend on.
//! It provides:
//! - Base error types
//! - Configuration scopes and the `ConfigStore` lookup trait
//! - Platform helpers (executable detection, executable suffix)
//!
//! This crate has no dependencies on other hookwise crates.

pub mod error;
pub mod platform;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{ConfigScope, ConfigStore, ConfigValue};
