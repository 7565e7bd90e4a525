//! Job queue entry module
//!
//! The unit the queue builder produces and the dispatch loop consumes: a
//! job paired with one partition it might run in. A job with N admissible
//! partitions produces N entries (spec §4.1).

use serde::{Deserialize, Serialize};

use super::super::value_objects::{JobId, Priority};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobQueueEntry {
    pub job_id: JobId,
    pub partition_name: String,
    pub priority: Priority,
}

impl JobQueueEntry {
    pub fn new(job_id: JobId, partition_name: impl Into<String>, priority: Priority) -> Self {
        Self {
            job_id,
            partition_name: partition_name.into(),
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_partition_name_verbatim() {
        let entry = JobQueueEntry::new(JobId::new(7), "gpu", Priority::new(500));
        assert_eq!(entry.partition_name, "gpu");
    }
}
