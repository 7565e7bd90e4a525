//! Dependency entity module
//!
//! Defines the typed edges of a job's dependency list (spec §3, §4.2) and
//! the grammar they round-trip to. A dependent job owns its own list; a
//! spec carries only a target id plus the kind of edge, never a strong
//! reference to the target job record (the target may vanish).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::super::value_objects::JobId;

/// The kind of edge a `DependencySpec` represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// Target must have started (past pending).
    After,
    /// Target finished, in any state.
    AfterAny,
    /// Target finished and completed successfully.
    AfterOk,
    /// Target finished and did not complete successfully.
    AfterNotOk,
    /// This job expands a running job: restricted to same partition and QOS.
    Expand,
    /// No other job of the same owner and name may be active.
    Singleton,
}

impl DependencyKind {
    fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::After => "after",
            DependencyKind::AfterAny => "afterany",
            DependencyKind::AfterOk => "afterok",
            DependencyKind::AfterNotOk => "afternotok",
            DependencyKind::Expand => "expand",
            DependencyKind::Singleton => "singleton",
        }
    }
}

/// A single typed edge in a job's dependency list.
///
/// `target` is `None` only for `Singleton`, which carries no target id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencySpec {
    pub kind: DependencyKind,
    pub target: Option<JobId>,
}

impl DependencySpec {
    pub fn new(kind: DependencyKind, target: Option<JobId>) -> Self {
        Self { kind, target }
    }

    pub fn singleton() -> Self {
        Self {
            kind: DependencyKind::Singleton,
            target: None,
        }
    }

    pub fn after(kind: DependencyKind, target: JobId) -> Self {
        debug_assert_ne!(kind, DependencyKind::Singleton);
        Self {
            kind,
            target: Some(target),
        }
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some(id) => write!(f, "{}:{}", self.kind.as_str(), id),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

/// A job's full dependency list, renderable back to the canonical textual
/// grammar on demand (the source rewrites text in place as specs resolve;
/// this port regenerates it instead, per Design Notes §9).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyList {
    pub specs: Vec<DependencySpec>,
}

impl DependencyList {
    pub fn new(specs: Vec<DependencySpec>) -> Self {
        Self { specs }
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = JobId> + '_ {
        self.specs.iter().filter_map(|s| s.target)
    }
}

impl fmt::Display for DependencyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.specs.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", rendered.join(","))
    }
}
