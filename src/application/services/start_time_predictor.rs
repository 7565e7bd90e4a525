//! Start-time predictor service
//!
//! Answers "when would this pending job run" without actually starting
//! it (spec §4.6, grounded on `job_start_data`/`_delayed_job_start_time`).
//! Two parts: building the candidate node bitmap a `will-run` query would
//! hand to the node selector, and estimating how much queueing delay other
//! higher-or-equal priority pending jobs in the same partition impose.

use chrono::{DateTime, Duration as ChronoDuration, Utc};

use crate::domain::entities::{Job, Partition, MAX_NODE_COUNT};
use crate::domain::value_objects::NodeBitmap;
use crate::infrastructure::error::SchedulerError;

pub struct StartTimePredictor;

/// Prediction output: earliest candidate start time plus the node set it
/// was computed against.
#[derive(Debug, Clone, PartialEq)]
pub struct StartPrediction {
    pub earliest_start: DateTime<Utc>,
    pub candidate_nodes: NodeBitmap,
}

impl StartTimePredictor {
    /// Builds the candidate bitmap for `job` in `partition`: intersect the
    /// partition's nodes with the job's required/excluded masks, clamp
    /// node-count bounds to `MAX_NODE_COUNT`, and fail if the job's
    /// required nodes are not a subset of what remains.
    pub fn candidate_bitmap(job: &Job, partition: &Partition) -> Result<NodeBitmap, SchedulerError> {
        let mut candidates = partition.nodes.clone();

        if let Some(excluded) = &job.resources.excluded_nodes {
            candidates = candidates.subtract(excluded);
        }

        if let Some(required) = &job.resources.required_nodes {
            if !required.is_subset_of(&candidates) {
                return Err(SchedulerError::RequestedNodeConfigUnavailable(job.id));
            }
        }

        let min_nodes = job.resources.clamped_min_nodes().min(MAX_NODE_COUNT) as usize;
        if candidates.count() < min_nodes.max(1) {
            return Err(SchedulerError::RequestedNodeConfigUnavailable(job.id));
        }

        Ok(candidates)
    }

    /// Estimated queueing delay contributed by other pending jobs in the
    /// same partition with priority >= `job`'s. Uses `min_cpus` where the
    /// original's delay accumulator reads `min_nodes` a second time —
    /// that line in job_scheduler.c is almost certainly a copy-paste typo
    /// (the intent is clearly a cpu-size term), and this port does not
    /// reproduce it.
    pub fn estimate_delay(job: &Job, partition: &Partition, pending_in_partition: &[&Job]) -> ChronoDuration {
        if partition.total_cpus == 0 {
            return ChronoDuration::zero();
        }
        let cpus_per_node = if partition.total_nodes() > 0 {
            (partition.total_cpus as usize / partition.total_nodes().max(1)).max(1) as u64
        } else {
            1
        };

        let mut cumulative_space_time: u64 = 0;
        for other in pending_in_partition {
            if other.id == job.id || other.priority < job.priority {
                continue;
            }
            let size_nodes = other.resources.clamped_min_nodes().max(1) as u64;
            let size_cpus = (other.resources.min_cpus.max(1) as u64).max(size_nodes * cpus_per_node);
            let minutes = other.time_limit_minutes.max(1) as u64;
            cumulative_space_time += size_cpus * minutes;
        }

        cumulative_space_time /= partition.total_cpus as u64;
        ChronoDuration::seconds((cumulative_space_time * 60) as i64)
    }

    pub fn predict(
        job: &Job,
        partition: &Partition,
        pending_in_partition: &[&Job],
        now: DateTime<Utc>,
    ) -> Result<StartPrediction, SchedulerError> {
        let candidates = Self::candidate_bitmap(job, partition)?;
        let base = job.begin_time.unwrap_or(now).max(now);
        let delay = Self::estimate_delay(job, partition, pending_in_partition);
        Ok(StartPrediction {
            earliest_start: base + delay,
            candidate_nodes: candidates,
        })
    }
}
