//! State reason value object module
//!
//! A closed enumeration of the reasons a pending job is not yet runnable,
//! paired with an optional free-text description for operator tooling.
//! See spec §7 for the taxonomy this mirrors.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StateReasonTag {
    Held,
    HeldByUser,
    WaitingDependency,
    WaitingPriority,
    WaitingResources,
    WaitingLicenses,
    FailedAccount,
    FailedBadConstraints,
}

impl fmt::Display for StateReasonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StateReasonTag::Held => "held",
            StateReasonTag::HeldByUser => "held-by-user",
            StateReasonTag::WaitingDependency => "waiting-dependency",
            StateReasonTag::WaitingPriority => "waiting-priority",
            StateReasonTag::WaitingResources => "waiting-resources",
            StateReasonTag::WaitingLicenses => "waiting-licenses",
            StateReasonTag::FailedAccount => "failed-account",
            StateReasonTag::FailedBadConstraints => "failed-bad-constraints",
        };
        write!(f, "{}", s)
    }
}

/// A state-reason tag with an optional human-readable elaboration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateReason {
    pub tag: StateReasonTag,
    pub description: Option<String>,
}

impl StateReason {
    pub fn new(tag: StateReasonTag) -> Self {
        Self {
            tag,
            description: None,
        }
    }

    pub fn with_description(tag: StateReasonTag, description: impl Into<String>) -> Self {
        Self {
            tag,
            description: Some(description.into()),
        }
    }

    pub fn is_held(&self) -> bool {
        matches!(self.tag, StateReasonTag::Held | StateReasonTag::HeldByUser)
    }
}

impl fmt::Display for StateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "{} ({})", self.tag, desc),
            None => write!(f, "{}", self.tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_and_held_by_user_both_count_as_held() {
        assert!(StateReason::new(StateReasonTag::Held).is_held());
        assert!(StateReason::new(StateReasonTag::HeldByUser).is_held());
        assert!(!StateReason::new(StateReasonTag::WaitingPriority).is_held());
    }
}
