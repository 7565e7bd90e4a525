//! In-memory partition directory
//!
//! Same shape as `InMemoryJobDirectory` but keyed by partition name, since
//! partitions are addressed by name throughout the dispatch loop.

use std::collections::HashMap;

use crate::domain::entities::Partition;
use crate::domain::repositories::PartitionDirectory;
use crate::infrastructure::error::SchedulerError;

#[derive(Debug, Default)]
pub struct InMemoryPartitionDirectory {
    partitions: HashMap<String, Partition>,
}

impl InMemoryPartitionDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PartitionDirectory for InMemoryPartitionDirectory {
    fn insert(&mut self, partition: Partition) -> Result<(), SchedulerError> {
        self.partitions.insert(partition.name.clone(), partition);
        Ok(())
    }

    fn get(&self, name: &str) -> Option<&Partition> {
        self.partitions.get(name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Partition> {
        self.partitions.get_mut(name)
    }

    fn all(&self) -> Vec<&Partition> {
        self.partitions.values().collect()
    }

    fn len(&self) -> usize {
        self.partitions.len()
    }
}
