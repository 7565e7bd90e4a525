//! Job identifier value object module
//!
//! A `JobId` is the numeric handle used everywhere a job is referenced by
//! name rather than by owned value: dependency specs, queue entries, and
//! the directory lookup that stands in for the C source's raw pointer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique numeric identifier for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(u32);

impl JobId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for JobId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<JobId> for u32 {
    fn from(id: JobId) -> Self {
        id.0
    }
}
