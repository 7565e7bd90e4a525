//! Job start data use case
//!
//! External `will-run` / `job_start_data` query (spec §4.6): predicts when a
//! pending job would start without dispatching it. Acquires the read-only
//! queue-builder lock set since it must not mutate job or node state.

use crate::application::services::{StartPrediction, StartTimePredictor};
use crate::domain::value_objects::JobId;
use crate::infrastructure::context::SchedulerContext;
use crate::infrastructure::error::SchedulerError;
use crate::domain::repositories::JobDirectory;
use crate::domain::repositories::PartitionDirectory;

pub struct JobStartData;

impl JobStartData {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &self,
        ctx: &SchedulerContext,
        job_id: JobId,
    ) -> Result<StartPrediction, SchedulerError> {
        let locks = ctx.locks().queue_builder_locks().await;

        let job = locks
            .jobs
            .get(job_id)
            .ok_or(SchedulerError::InvalidJobId(job_id))?;

        let partition_name = job
            .partitions
            .first()
            .ok_or_else(|| SchedulerError::InvalidPartition("<none requested>".to_string()))?;
        let partition = locks
            .partitions
            .get(partition_name)
            .ok_or_else(|| SchedulerError::InvalidPartition(partition_name.clone()))?;

        let pending_in_partition: Vec<_> = locks
            .jobs
            .all()
            .into_iter()
            .filter(|j| j.state.is_pending() && j.partitions.iter().any(|p| p == partition_name))
            .collect();

        StartTimePredictor::predict(job, partition, &pending_in_partition, chrono::Utc::now())
    }
}

impl Default for JobStartData {
    fn default() -> Self {
        Self::new()
    }
}
