//! Outbound agent port
//!
//! The non-blocking RPC fan-out used to tell a compute node to launch a
//! job (spec §5, `agent_queue_request`). Enqueue must never await or block
//! the caller; the real transport fans messages out to node agents on its
//! own schedule.

use crate::domain::value_objects::JobId;
use crate::infrastructure::error::SchedulerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentMessage {
    pub job_id: JobId,
    pub target_nodes: Vec<String>,
    pub signed_credential: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait OutboundAgent: Send + Sync {
    fn enqueue(&self, message: AgentMessage) -> Result<(), SchedulerError>;
}
