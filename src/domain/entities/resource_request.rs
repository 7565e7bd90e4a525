//! Resource request entity module
//!
//! What a job asks for: node-count bounds, per-node resources, a feature
//! constraint expression, and the node masks that narrow candidate
//! selection before the node selector plugin ever runs (spec §3, §4.5).

use serde::{Deserialize, Serialize};

use super::super::value_objects::NodeBitmap;

/// Resource ask attached to a job, consulted by the dispatch loop and the
/// start-time predictor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceRequest {
    pub min_nodes: u32,
    pub max_nodes: Option<u32>,
    pub min_cpus: u32,
    pub memory_per_node_mb: Option<u64>,
    pub gres: Vec<String>,
    /// Raw, unparsed feature constraint expression (`&`, `|`, `[...]`, `*N`).
    pub feature_expr: Option<String>,
    pub required_nodes: Option<NodeBitmap>,
    pub excluded_nodes: Option<NodeBitmap>,
    pub reservation_name: Option<String>,
}

/// Hard cap applied to node-count bounds before they reach the predictor or
/// the node selector (spec §4.5/§4.6 clamping rule).
pub const MAX_NODE_COUNT: u32 = 500_000;

impl ResourceRequest {
    pub fn new(min_nodes: u32, min_cpus: u32) -> Self {
        Self {
            min_nodes,
            max_nodes: None,
            min_cpus,
            memory_per_node_mb: None,
            gres: Vec::new(),
            feature_expr: None,
            required_nodes: None,
            excluded_nodes: None,
            reservation_name: None,
        }
    }

    /// `min_nodes`/`max_nodes` clamped to `MAX_NODE_COUNT`, matching the
    /// original's defensive cap against overflow in the node-count math.
    pub fn clamped_min_nodes(&self) -> u32 {
        self.min_nodes.min(MAX_NODE_COUNT)
    }

    pub fn clamped_max_nodes(&self) -> Option<u32> {
        self.max_nodes.map(|n| n.min(MAX_NODE_COUNT))
    }

    pub fn has_feature_constraint(&self) -> bool {
        self.feature_expr.is_some()
    }

    pub fn uses_reservation(&self) -> bool {
        self.reservation_name.is_some()
    }
}
