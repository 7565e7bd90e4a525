//! Dependency engine service
//!
//! Builds a `petgraph` digraph over a job set's dependency specs, detects
//! cycles, and evaluates whether a single job's dependency list is
//! currently satisfied. Grounded on jobweaver's `DependencyAnalyzer`,
//! re-keyed from job names to `JobId` and generalized from a single
//! untyped edge label to the six typed `DependencyKind` variants, with
//! satisfaction semantics read off `test_job_dependency` /
//! `update_job_dependency` / `_scan_depend` in the original scheduler.

use std::collections::HashMap;

use chrono::Utc;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::domain::entities::{DependencyKind, DependencySpec, Job};
use crate::domain::repositories::JobDirectory;
use crate::domain::value_objects::JobId;
use crate::infrastructure::error::SchedulerError;

/// Result of checking one job's dependency list against current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    Satisfied,
    Waiting,
    /// A referenced target no longer exists in the directory; slurm treats
    /// this as satisfied rather than stuck (the job it depended on is gone
    /// for good, so nothing will ever resolve the wait).
    TargetMissing,
    /// An `afternotok` target finished successfully, or an `afterok`
    /// target finished unsuccessfully: the dependency can never resolve.
    Failed,
}

pub struct DependencyEngine {
    graph: DiGraph<JobId, DependencyKind>,
    indices: HashMap<JobId, NodeIndex>,
}

impl DependencyEngine {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            indices: HashMap::new(),
        }
    }

    fn ensure_node(&mut self, id: JobId) -> NodeIndex {
        *self.indices.entry(id).or_insert_with(|| self.graph.add_node(id))
    }

    /// Rebuilds the graph from scratch over the given job set. Singleton
    /// specs contribute no edge: singleton conflicts are resolved by name
    /// scan, not graph reachability.
    pub fn build_graph(&mut self, jobs: &[&Job]) {
        self.graph.clear();
        self.indices.clear();

        for job in jobs {
            self.ensure_node(job.id);
        }
        for job in jobs {
            for spec in &job.dependencies.specs {
                if let Some(target) = spec.target {
                    let from = self.ensure_node(target);
                    let to = self.ensure_node(job.id);
                    self.graph.add_edge(from, to, spec.kind);
                }
            }
        }
    }

    /// Returns the first job id participating in a cycle, if any.
    pub fn find_cycle(&self) -> Option<JobId> {
        match toposort(&self.graph, None) {
            Ok(_) => None,
            Err(cycle) => Some(self.graph[cycle.node_id()]),
        }
    }

    pub fn has_circular_dependencies(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// Evaluates every spec in `job`'s dependency list against `directory`.
    /// All specs must be satisfied for the list as a whole to be
    /// satisfied; any unresolved target waits; any contradictory target
    /// (`afterok` on a failed job, `afternotok` on a successful one) fails
    /// the whole list permanently.
    pub fn evaluate(&self, job: &Job, directory: &dyn JobDirectory) -> DependencyStatus {
        if job.dependencies.is_empty() {
            return DependencyStatus::Satisfied;
        }

        let mut any_waiting = false;
        for spec in &job.dependencies.specs {
            match self.evaluate_one(job, spec, directory) {
                DependencyStatus::Satisfied | DependencyStatus::TargetMissing => continue,
                DependencyStatus::Waiting => any_waiting = true,
                DependencyStatus::Failed => return DependencyStatus::Failed,
            }
        }

        if any_waiting {
            DependencyStatus::Waiting
        } else {
            DependencyStatus::Satisfied
        }
    }

    /// Evaluates `job`'s dependency list and, unless a spec evaluates to
    /// `failed`, rewrites the list in place to drop every spec that
    /// resolved as satisfied or whose target has vanished (spec §4.2: "any
    /// spec that evaluates to satisfied is removed... an evaluate pass
    /// that mutates the list does so only after all specs have been
    /// examined"). On `failed`, the list is left untouched and the caller
    /// is expected to transition the job to a terminal state instead.
    pub fn evaluate_and_prune(&self, job: &mut Job, directory: &dyn JobDirectory) -> DependencyStatus {
        if job.dependencies.is_empty() {
            return DependencyStatus::Satisfied;
        }

        let mut kept = Vec::new();
        let mut any_waiting = false;
        for spec in &job.dependencies.specs {
            match self.evaluate_one(job, spec, directory) {
                DependencyStatus::Satisfied | DependencyStatus::TargetMissing => continue,
                DependencyStatus::Waiting => {
                    any_waiting = true;
                    kept.push(spec.clone());
                }
                DependencyStatus::Failed => return DependencyStatus::Failed,
            }
        }

        job.dependencies.specs = kept;
        if any_waiting {
            DependencyStatus::Waiting
        } else {
            DependencyStatus::Satisfied
        }
    }

    fn evaluate_one(
        &self,
        job: &Job,
        spec: &DependencySpec,
        directory: &dyn JobDirectory,
    ) -> DependencyStatus {
        if spec.kind == DependencyKind::Singleton {
            return if self.singleton_conflict(job, directory) {
                DependencyStatus::Waiting
            } else {
                DependencyStatus::Satisfied
            };
        }

        let target_id = match spec.target {
            Some(id) => id,
            None => return DependencyStatus::Satisfied,
        };

        let target = match directory.get(target_id) {
            Some(job) => job,
            None => return DependencyStatus::TargetMissing,
        };

        match spec.kind {
            DependencyKind::After => {
                if target.state.is_past_pending() {
                    DependencyStatus::Satisfied
                } else {
                    DependencyStatus::Waiting
                }
            }
            DependencyKind::AfterAny => {
                if target.state.is_finished() {
                    DependencyStatus::Satisfied
                } else {
                    DependencyStatus::Waiting
                }
            }
            DependencyKind::AfterOk => {
                if target.state.is_complete() {
                    DependencyStatus::Satisfied
                } else if target.state.is_finished() {
                    DependencyStatus::Failed
                } else {
                    DependencyStatus::Waiting
                }
            }
            DependencyKind::AfterNotOk => {
                if target.state.is_finished() && !target.state.is_complete() {
                    DependencyStatus::Satisfied
                } else if target.state.is_complete() {
                    DependencyStatus::Failed
                } else {
                    DependencyStatus::Waiting
                }
            }
            DependencyKind::Expand => {
                if target.state.is_running() {
                    DependencyStatus::Satisfied
                } else {
                    DependencyStatus::Waiting
                }
            }
            DependencyKind::Singleton => unreachable!("singleton handled above before target lookup"),
        }
    }

    /// True if any other pending/running job shares `job`'s name and owner
    /// and carries a singleton spec: the scan `_scan_depend` performs
    /// before releasing a singleton-held job.
    pub fn singleton_conflict(&self, job: &Job, directory: &dyn JobDirectory) -> bool {
        if !job.is_singleton() {
            return false;
        }
        directory.all().iter().any(|other| {
            other.id != job.id
                && other.name == job.name
                && other.uid == job.uid
                && !other.state.is_finished()
        })
    }

    /// Stamps `eligible_time` on every job whose dependencies just cleared
    /// and which has not already been stamped. Observability only; the
    /// dispatch loop never reads this field (supplemented feature,
    /// grounded on `set_job_elig_time`).
    pub fn stamp_eligible_times(&self, directory: &mut dyn JobDirectory) {
        let now = Utc::now();
        let candidates: Vec<JobId> = directory
            .all()
            .into_iter()
            .filter(|j| j.eligible_time.is_none())
            .map(|j| j.id)
            .collect();

        let mut to_stamp = Vec::new();
        for id in candidates {
            let snapshot = match directory.get(id) {
                Some(job) => job.clone(),
                None => continue,
            };
            if self.evaluate(&snapshot, directory) == DependencyStatus::Satisfied {
                to_stamp.push(id);
            }
        }

        for id in to_stamp {
            if let Some(job) = directory.get_mut(id) {
                job.eligible_time = Some(now);
            }
        }
    }
}

impl Default for DependencyEngine {
    fn default() -> Self {
        Self::new()
    }
}
