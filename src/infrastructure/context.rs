//! Scheduler context
//!
//! Owns the four locked sub-structures (spec §5) plus the plugin
//! collaborators every use case needs. One `SchedulerContext` is built per
//! running scheduler instance; use cases borrow it rather than owning
//! their own copies of state.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::ports::{
    AssociationValidator, CredentialSigner, LicenseEngine, NodeSelector, OutboundAgent,
    PreemptionEngine, ReservationEngine,
};
use crate::domain::value_objects::NodeBitmap;
use crate::infrastructure::config::SchedulerConfig;
use crate::infrastructure::locks::LockSet;
use crate::infrastructure::repositories::{InMemoryJobDirectory, InMemoryPartitionDirectory};

/// The plugin collaborators a `SchedulerContext` delegates to. Grouped into
/// one struct purely to keep `SchedulerContext::new`'s argument list short.
pub struct PluginPorts {
    pub node_selector: Arc<dyn NodeSelector>,
    pub reservation_engine: Arc<dyn ReservationEngine>,
    pub license_engine: Arc<dyn LicenseEngine>,
    pub preemption_engine: Arc<dyn PreemptionEngine>,
    pub association_validator: Arc<dyn AssociationValidator>,
    pub credential_signer: Arc<dyn CredentialSigner>,
    pub outbound_agent: Arc<dyn OutboundAgent>,
}

pub struct SchedulerContext {
    pub config: RwLock<SchedulerConfig>,
    pub jobs: RwLock<InMemoryJobDirectory>,
    pub nodes: RwLock<NodeBitmap>,
    pub partitions: RwLock<InMemoryPartitionDirectory>,
    pub ports: PluginPorts,
}

impl SchedulerContext {
    pub fn new(node_count: usize, config: SchedulerConfig, ports: PluginPorts) -> Self {
        Self {
            config: RwLock::new(config),
            jobs: RwLock::new(InMemoryJobDirectory::new()),
            nodes: RwLock::new(NodeBitmap::full(node_count)),
            partitions: RwLock::new(InMemoryPartitionDirectory::new()),
            ports,
        }
    }

    pub fn locks(&self) -> LockSet<'_> {
        LockSet::new(&self.config, &self.jobs, &self.nodes, &self.partitions)
    }
}
