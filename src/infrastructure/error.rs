//! Scheduler error type module
//!
//! `SchedulerError` carries the user-facing error kinds a caller of the
//! external interface (§6) can receive. `SelectOutcome` and
//! `DispatchOutcome` are deliberately *not* part of this enum: they are
//! expected per-pass control-flow results, not failures, and library code
//! never wraps them in `Result`.

use thiserror::Error;

use crate::domain::value_objects::{JobId, NodeBitmap, StateReasonTag};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("job {0} does not exist")]
    InvalidJobId(JobId),

    #[error("partition {0} does not exist")]
    InvalidPartition(String),

    #[error("partition {0} has scheduling disabled")]
    Disabled(String),

    #[error("node {0} does not exist")]
    InvalidNodeName(String),

    #[error("partition {0} configuration unavailable")]
    PartConfigUnavailable(String),

    #[error("requested node configuration unavailable for job {0}")]
    RequestedNodeConfigUnavailable(JobId),

    #[error("dependency error: {0}")]
    Dependency(String),

    #[error("circular dependency detected starting at job {0}")]
    CircularDependency(JobId),

    #[error("invalid feature expression: {0}")]
    InvalidFeature(String),
}

/// Outcome of asking the node selector (and its gating checks) to place one
/// job-partition queue entry. A pass over the queue produces one of these
/// per entry; none of them represent a scheduler failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    Selected(NodeBitmap),
    ResourceUnavailable,
    LicenseUnavailable,
    AssociationInvalid,
    PartitionDown,
    ReservationConflict,
}

/// Outcome recorded for one job after a dispatch pass has finished
/// considering it, independent of why: useful both for the CLI summary and
/// for per-entry test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Dispatched { job_id: JobId, partition: String },
    Skipped { job_id: JobId, reason: StateReasonTag },
    Deferred { job_id: JobId },
}
