//! Central lock set
//!
//! The four named locks (config, jobs, nodes, partitions) must always be
//! acquired in that order to avoid deadlock (spec §5). `LockSet` is the
//! only way to reach more than one of them at once: each method acquires
//! exactly the combination one call site needs, in the canonical order, so
//! a caller cannot accidentally acquire `nodes` before `jobs`.

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::value_objects::NodeBitmap;
use crate::infrastructure::config::SchedulerConfig;
use crate::infrastructure::repositories::{InMemoryJobDirectory, InMemoryPartitionDirectory};

pub struct LockSet<'a> {
    config: &'a RwLock<SchedulerConfig>,
    jobs: &'a RwLock<InMemoryJobDirectory>,
    nodes: &'a RwLock<NodeBitmap>,
    partitions: &'a RwLock<InMemoryPartitionDirectory>,
}

pub struct QueueBuilderLocks<'a> {
    pub config: RwLockReadGuard<'a, SchedulerConfig>,
    pub jobs: RwLockReadGuard<'a, InMemoryJobDirectory>,
    pub partitions: RwLockReadGuard<'a, InMemoryPartitionDirectory>,
}

pub struct DispatchLocks<'a> {
    pub config: RwLockReadGuard<'a, SchedulerConfig>,
    pub jobs: RwLockWriteGuard<'a, InMemoryJobDirectory>,
    pub nodes: RwLockWriteGuard<'a, NodeBitmap>,
    pub partitions: RwLockReadGuard<'a, InMemoryPartitionDirectory>,
}

pub struct PrologPrepareLocks<'a> {
    pub config: RwLockReadGuard<'a, SchedulerConfig>,
    pub jobs: RwLockReadGuard<'a, InMemoryJobDirectory>,
}

impl<'a> LockSet<'a> {
    pub fn new(
        config: &'a RwLock<SchedulerConfig>,
        jobs: &'a RwLock<InMemoryJobDirectory>,
        nodes: &'a RwLock<NodeBitmap>,
        partitions: &'a RwLock<InMemoryPartitionDirectory>,
    ) -> Self {
        Self {
            config,
            jobs,
            nodes,
            partitions,
        }
    }

    /// Read-only locks for building the job queue: no mutation happens
    /// during queue construction.
    pub async fn queue_builder_locks(&self) -> QueueBuilderLocks<'a> {
        let config = self.config.read().await;
        let jobs = self.jobs.read().await;
        let partitions = self.partitions.read().await;
        QueueBuilderLocks {
            config,
            jobs,
            partitions,
        }
    }

    /// Full write access for a dispatch pass: job state and node
    /// availability both change as entries are placed.
    pub async fn dispatch_locks(&self) -> DispatchLocks<'a> {
        let config = self.config.read().await;
        let jobs = self.jobs.write().await;
        let nodes = self.nodes.write().await;
        let partitions = self.partitions.read().await;
        DispatchLocks {
            config,
            jobs,
            nodes,
            partitions,
        }
    }

    /// Read-only locks for building a prolog/epilog child's argv and
    /// environment. The lifecycle runner drops this guard set before
    /// awaiting the child process, then re-acquires `jobs`/`nodes`
    /// write locks separately to apply the outcome.
    pub async fn prolog_prepare_locks(&self) -> PrologPrepareLocks<'a> {
        let config = self.config.read().await;
        let jobs = self.jobs.read().await;
        PrologPrepareLocks { config, jobs }
    }
}
