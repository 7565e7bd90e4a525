//! Preemption engine port
//!
//! Given a job that could not otherwise be placed, finds running jobs of
//! lower priority whose resources would free up enough capacity (spec
//! §4.5, `slurm_find_preemptable_jobs`).

use crate::domain::entities::Job;
use crate::domain::value_objects::JobId;

#[cfg_attr(test, mockall::automock)]
pub trait PreemptionEngine: Send + Sync {
    fn find_preemptable(&self, job: &Job, running: &[Job]) -> Vec<JobId>;
}

/// Never preempts; a harness without a preemption policy configured.
pub struct NoPreemption;

impl PreemptionEngine for NoPreemption {
    fn find_preemptable(&self, _job: &Job, _running: &[Job]) -> Vec<JobId> {
        Vec::new()
    }
}

/// Preempts every running job of strictly lower priority, in priority
/// order, lowest first, until `job`'s node requirement could be met by the
/// union of their partitions. Intended for deterministic testing rather
/// than production use.
pub struct LowestPriorityFirst;

impl PreemptionEngine for LowestPriorityFirst {
    fn find_preemptable(&self, job: &Job, running: &[Job]) -> Vec<JobId> {
        let mut lower: Vec<&Job> = running
            .iter()
            .filter(|r| r.priority < job.priority)
            .collect();
        lower.sort_by_key(|r| r.priority);

        let needed = job.resources.clamped_min_nodes() as usize;
        let mut freed = 0usize;
        let mut victims = Vec::new();
        for candidate in lower {
            if freed >= needed {
                break;
            }
            freed += candidate.resources.clamped_min_nodes().max(1) as usize;
            victims.push(candidate.id);
        }
        victims
    }
}
