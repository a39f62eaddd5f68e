//! Hook specification structures
//!
//! Defines a single resolved hook ([`HookSpec`]), where it came from
//! ([`Provenance`]), and the ordered sequence produced by resolution
//! ([`HookList`]).

use super::policy::HookdirPolicy;
use hookwise_core::ConfigScope;
use serde::Serialize;
use std::ffi::OsString;
use std::path::PathBuf;

/// Where a hook was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// A `hook.<event>.command` value read from this configuration scope
    Config(ConfigScope),
    /// A script found in the legacy hooks directory, under this policy
    Hookdir(HookdirPolicy),
}

impl Provenance {
    /// Short label used in listings (`global`, `local`, `hookdir`, ...)
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::Config(scope) => scope.name(),
            Provenance::Hookdir(_) => "hookdir",
        }
    }

    /// Policy annotation for legacy directory hooks
    #[must_use]
    pub fn annotation(&self) -> Option<&'static str> {
        match self {
            Provenance::Config(_) => None,
            Provenance::Hookdir(policy) => policy.annotation(),
        }
    }

    /// Check if this hook comes from the legacy hooks directory
    #[must_use]
    pub fn is_hookdir(&self) -> bool {
        matches!(self, Provenance::Hookdir(_))
    }
}

/// A single resolved hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpec {
    /// Command or script path, as shown to users
    pub identity: String,

    /// Program handed to the process spawner
    ///
    /// Equal to `identity` except for hookdir scripts whose path is not valid
    /// UTF-8, where `identity` is a lossy rendering.
    pub program: OsString,

    /// Where the hook was declared
    pub provenance: Provenance,

    /// Index in the resolved sequence
    pub position: usize,
}

impl HookSpec {
    /// Display view of this hook
    #[must_use]
    pub fn listing(&self) -> HookListing {
        HookListing {
            identity: self.identity.clone(),
            origin: self.provenance.label(),
            annotation: self.provenance.annotation(),
        }
    }
}

/// Read-only view of a hook for display purposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookListing {
    /// Command or script path
    pub identity: String,
    /// Scope name, or `hookdir`
    pub origin: &'static str,
    /// Policy annotation for legacy directory hooks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<&'static str>,
}

impl std::fmt::Display for HookListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.origin, self.identity)?;
        if let Some(annotation) = self.annotation {
            write!(f, " ({annotation})")?;
        }
        Ok(())
    }
}

/// Ordered hook sequence for one event
///
/// Insertion order is execution order. Declaring a command that is already
/// present moves it to the tail, so the latest declaration decides where it
/// runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookList {
    hooks: Vec<HookSpec>,
}

impl HookList {
    /// Create an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configured command, replacing any earlier declaration of it
    pub fn declare(&mut self, identity: impl Into<String>, scope: ConfigScope) {
        let identity = identity.into();
        self.hooks.retain(|hook| hook.identity != identity);
        let program = OsString::from(&identity);
        self.push(identity, program, Provenance::Config(scope));
    }

    /// Append a script found in the legacy hooks directory
    pub fn push_hookdir(&mut self, path: impl Into<PathBuf>, policy: HookdirPolicy) {
        let path = path.into();
        let identity = path.to_string_lossy().into_owned();
        self.push(identity, path.into_os_string(), Provenance::Hookdir(policy));
    }

    fn push(&mut self, identity: String, program: OsString, provenance: Provenance) {
        self.hooks.push(HookSpec {
            identity,
            program,
            provenance,
            position: 0,
        });
        self.renumber();
    }

    /// Keep only the hooks matching `keep`
    ///
    /// Used by callers enforcing a hookdir policy before running.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&HookSpec) -> bool,
    {
        self.hooks.retain(keep);
        self.renumber();
    }

    fn renumber(&mut self) {
        for (position, hook) in self.hooks.iter_mut().enumerate() {
            hook.position = position;
        }
    }

    /// Check if the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Number of hooks
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Iterate hooks in execution order
    pub fn iter(&self) -> std::slice::Iter<'_, HookSpec> {
        self.hooks.iter()
    }

    /// Hooks as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[HookSpec] {
        &self.hooks
    }

    /// Display view of every hook, in order
    #[must_use]
    pub fn listings(&self) -> Vec<HookListing> {
        self.hooks.iter().map(HookSpec::listing).collect()
    }
}

impl<'a> IntoIterator for &'a HookList {
    type Item = &'a HookSpec;
    type IntoIter = std::slice::Iter<'a, HookSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.hooks.iter()
    }
}
