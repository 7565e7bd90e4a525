//! Job directory repository trait
//!
//! The collaborator every dependency lookup, queue-build, and dispatch
//! pass goes through to resolve a `JobId` into a `Job`. Grounded on the
//! jobweaver `JobRepository` trait, generalized from name-keyed storage to
//! id-keyed storage and from `anyhow::Result` to the scheduler's own error
//! type.

use crate::domain::entities::Job;
use crate::domain::value_objects::JobId;
use crate::infrastructure::error::SchedulerError;

pub trait JobDirectory: Send + Sync {
    fn insert(&mut self, job: Job) -> Result<(), SchedulerError>;
    fn get(&self, id: JobId) -> Option<&Job>;
    fn get_mut(&mut self, id: JobId) -> Option<&mut Job>;
    fn remove(&mut self, id: JobId) -> Option<Job>;
    fn all(&self) -> Vec<&Job>;
    fn all_mut(&mut self) -> Vec<&mut Job>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
