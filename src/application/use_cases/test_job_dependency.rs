//! Test job dependency use case
//!
//! Wraps `DependencyEngine::evaluate_and_prune` for the external
//! `test_job_dependency` operation (spec §4.2): given a job id, report
//! whether its dependency list is currently satisfied, and drop every spec
//! that resolved as satisfied or whose target has vanished, unless the
//! pass reports `failed` (in which case the list is left untouched).

use crate::application::services::{DependencyEngine, DependencyStatus};
use crate::domain::repositories::JobDirectory;
use crate::domain::value_objects::JobId;
use crate::infrastructure::error::SchedulerError;

pub struct TestJobDependency;

impl TestJobDependency {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(
        &self,
        job_id: JobId,
        directory: &mut dyn JobDirectory,
    ) -> Result<DependencyStatus, SchedulerError> {
        let mut job = directory
            .get(job_id)
            .cloned()
            .ok_or(SchedulerError::InvalidJobId(job_id))?;
        let status = DependencyEngine::new().evaluate_and_prune(&mut job, directory);
        if let Some(slot) = directory.get_mut(job_id) {
            slot.dependencies = job.dependencies;
        }
        Ok(status)
    }
}

impl Default for TestJobDependency {
    fn default() -> Self {
        Self::new()
    }
}
