//! mpsc-backed outbound agent
//!
//! Implements `OutboundAgent` over an unbounded `tokio::sync::mpsc`
//! channel: enqueue is synchronous and infallible except when the receiver
//! has been dropped, matching "enqueue never blocks and never awaits"
//! (spec §5).

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::domain::ports::{AgentMessage, OutboundAgent};
use crate::infrastructure::error::SchedulerError;

pub struct MpscAgentQueue {
    sender: UnboundedSender<AgentMessage>,
}

impl MpscAgentQueue {
    pub fn channel() -> (Self, UnboundedReceiver<AgentMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl OutboundAgent for MpscAgentQueue {
    fn enqueue(&self, message: AgentMessage) -> Result<(), SchedulerError> {
        self.sender
            .send(message)
            .map_err(|_| SchedulerError::Dependency("outbound agent channel closed".to_string()))
    }
}
