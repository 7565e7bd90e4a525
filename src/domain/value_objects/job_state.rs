//! Job state value object module
//!
//! This module defines the closed set of lifecycle states a job can occupy,
//! and the "terminal" / "finished" / "complete" predicates the dependency
//! engine and dispatch loop consult.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle state of a job.
///
/// Exactly one state applies at any instant; see the `Job` invariants for
/// how state interacts with priority and state-reason.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum JobState {
    Pending,
    Running,
    Suspended,
    Completing,
    Complete,
    Failed,
    Cancelled,
}

impl JobState {
    /// True once a job is no longer pending, i.e. it has started in some form.
    ///
    /// Used by `after` dependencies, which only require the target to be
    /// "past pending" rather than fully finished.
    pub fn is_past_pending(&self) -> bool {
        !matches!(self, JobState::Pending)
    }

    /// True for any terminal state, successful or not.
    ///
    /// Used by `afterany` dependencies and by the singleton scan.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            JobState::Complete | JobState::Failed | JobState::Cancelled
        )
    }

    /// True only for the successful terminal state.
    ///
    /// Used by `afterok` / `afternotok` dependencies.
    pub fn is_complete(&self) -> bool {
        matches!(self, JobState::Complete)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, JobState::Running)
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, JobState::Suspended)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, JobState::Pending)
    }

    pub fn is_completing(&self) -> bool {
        matches!(self, JobState::Completing)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobState::Pending => "pending",
            JobState::Running => "running",
            JobState::Suspended => "suspended",
            JobState::Completing => "completing",
            JobState::Complete => "complete",
            JobState::Failed => "failed",
            JobState::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}
