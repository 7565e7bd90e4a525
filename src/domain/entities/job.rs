//! Job entity module
//!
//! The core scheduling record: identity, lifecycle state, priority,
//! dependencies, and resource ask. Mirrors the shape of Control-M's job
//! record in spirit (one struct, many optional facets) but the fields are
//! those spec §3 actually needs for queueing, dependency evaluation, and
//! dispatch rather than a job-definition import format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::super::value_objects::{JobId, JobState, Priority, StateReason};
use super::{DependencyList, ResourceRequest};

/// A schedulable unit of work.
///
/// Invariants (spec §3): `priority == 0` implies `state == Pending` and a
/// held `StateReason`; `priority == 1` implies the job was released behind
/// a dependency and has not yet been reconsidered by the priority
/// comparator. A job's dependency list is a plain owned sequence — nothing
/// here holds a strong reference back to the jobs it depends on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub uid: u32,
    pub gid: u32,
    pub account: Option<String>,
    pub state: JobState,
    pub state_reason: Option<StateReason>,
    pub priority: Priority,
    pub submit_time: DateTime<Utc>,
    pub begin_time: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub time_limit_minutes: u32,
    /// Partitions the job may run in, in preference order. Dispatch moves
    /// the chosen partition to the front on success.
    pub partitions: Vec<String>,
    pub bound_partition: Option<String>,
    pub resources: ResourceRequest,
    pub dependencies: DependencyList,
    pub batch: bool,
    /// SPANK plugin environment, merged first when building the prolog/epilog
    /// child environment so job-supplied vars can still override them.
    pub spank_env: HashMap<String, String>,
    pub restart_count: u32,
    /// Opaque token the node selector returns on a successful pass; carried
    /// so a later retry of the same candidate set can short-circuit.
    pub selection_cookie: Option<String>,
    /// Stamped by the dependency engine the instant all dependencies clear;
    /// observability only, never consulted for scheduling decisions.
    pub eligible_time: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(id: JobId, name: impl Into<String>, uid: u32, gid: u32) -> Self {
        Self {
            id,
            name: name.into(),
            uid,
            gid,
            account: None,
            state: JobState::Pending,
            state_reason: None,
            priority: Priority::new(100),
            submit_time: Utc::now(),
            begin_time: None,
            start_time: None,
            end_time: None,
            time_limit_minutes: 60,
            partitions: Vec::new(),
            bound_partition: None,
            resources: ResourceRequest::new(1, 1),
            dependencies: DependencyList::default(),
            batch: true,
            spank_env: HashMap::new(),
            restart_count: 0,
            selection_cookie: None,
            eligible_time: None,
        }
    }

    pub fn is_held(&self) -> bool {
        self.priority.is_held()
    }

    pub fn is_system_held(&self) -> bool {
        self.priority.is_system_held()
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.specs.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.dependencies
            .specs
            .iter()
            .any(|d| d.kind == super::DependencyKind::Singleton)
    }

    /// Moves `chosen` to the front of the admissible partition list,
    /// preserving the rest in their existing order. No-op if `chosen` is
    /// not already in the list.
    pub fn rebuild_partition_list(&mut self, chosen: &str) {
        if let Some(pos) = self.partitions.iter().position(|p| p == chosen) {
            let name = self.partitions.remove(pos);
            self.partitions.insert(0, name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_is_pending_with_default_priority() {
        let job = Job::new(JobId::new(1), "sim01", 1000, 1000);
        assert!(job.state.is_pending());
        assert!(!job.is_held());
        assert_eq!(job.dependency_count(), 0);
    }

    #[test]
    fn rebuild_partition_list_moves_chosen_to_front() {
        let mut job = Job::new(JobId::new(1), "sim01", 1000, 1000);
        job.partitions = vec!["debug".into(), "batch".into(), "gpu".into()];
        job.rebuild_partition_list("gpu");
        assert_eq!(job.partitions, vec!["gpu", "debug", "batch"]);
    }

    #[test]
    fn rebuild_partition_list_ignores_unknown_partition() {
        let mut job = Job::new(JobId::new(1), "sim01", 1000, 1000);
        job.partitions = vec!["debug".into(), "batch".into()];
        job.rebuild_partition_list("gpu");
        assert_eq!(job.partitions, vec!["debug", "batch"]);
    }

    #[test]
    fn held_priority_is_zero() {
        let mut job = Job::new(JobId::new(1), "sim01", 1000, 1000);
        job.priority = Priority::new(0);
        assert!(job.is_held());
    }
}
