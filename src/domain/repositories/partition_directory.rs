//! Partition directory repository trait
//!
//! Name-keyed lookup for partitions, mirroring `JobDirectory`'s shape but
//! keyed the way partitions naturally are: by their configured name.

use crate::domain::entities::Partition;
use crate::infrastructure::error::SchedulerError;

pub trait PartitionDirectory: Send + Sync {
    fn insert(&mut self, partition: Partition) -> Result<(), SchedulerError>;
    fn get(&self, name: &str) -> Option<&Partition>;
    fn get_mut(&mut self, name: &str) -> Option<&mut Partition>;
    fn all(&self) -> Vec<&Partition>;
    fn len(&self) -> usize;
}
