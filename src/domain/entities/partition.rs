//! Partition entity module
//!
//! A scheduling partition: a named pool of nodes with its own enablement
//! flag, node-count bounds, and time-limit ceiling (spec §3, §4.5).

use serde::{Deserialize, Serialize};

use super::super::value_objects::NodeBitmap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Partition {
    pub name: String,
    pub nodes: NodeBitmap,
    pub scheduling_enabled: bool,
    pub min_nodes: u32,
    pub max_nodes: Option<u32>,
    pub max_time_limit_minutes: Option<u32>,
    pub total_cpus: u32,
}

impl Partition {
    pub fn new(name: impl Into<String>, nodes: NodeBitmap, total_cpus: u32) -> Self {
        Self {
            name: name.into(),
            nodes,
            scheduling_enabled: true,
            min_nodes: 1,
            max_nodes: None,
            max_time_limit_minutes: None,
            total_cpus,
        }
    }

    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn accepts_node_count(&self, count: u32) -> bool {
        count >= self.min_nodes && self.max_nodes.map_or(true, |max| count <= max)
    }

    pub fn accepts_time_limit(&self, minutes: u32) -> bool {
        self.max_time_limit_minutes.map_or(true, |max| minutes <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_partition_is_distinguishable_from_node_bounds() {
        let mut part = Partition::new("debug", NodeBitmap::full(4), 32);
        part.scheduling_enabled = false;
        assert!(!part.scheduling_enabled);
        assert!(part.accepts_node_count(2));
    }

    #[test]
    fn node_count_bounds_are_inclusive() {
        let mut part = Partition::new("batch", NodeBitmap::full(8), 64);
        part.min_nodes = 2;
        part.max_nodes = Some(4);
        assert!(!part.accepts_node_count(1));
        assert!(part.accepts_node_count(2));
        assert!(part.accepts_node_count(4));
        assert!(!part.accepts_node_count(5));
    }
}
