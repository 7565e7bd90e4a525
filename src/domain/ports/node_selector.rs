//! Node selector port
//!
//! The plugin boundary the dispatch loop calls into after every gating
//! check has passed (spec §4.5). Production deployments back this with a
//! real topology-aware selection plugin; this crate ships a deterministic
//! bitmap-intersection stub sufficient for the CLI harness and tests.

use crate::domain::entities::{Job, Partition};
use crate::domain::value_objects::NodeBitmap;
use crate::infrastructure::error::SelectOutcome;

#[cfg_attr(test, mockall::automock)]
pub trait NodeSelector: Send + Sync {
    fn select(&self, job: &Job, partition: &Partition, candidates: &NodeBitmap) -> SelectOutcome;
}

/// Picks the first `min_nodes` candidate nodes that also belong to the
/// partition, with no topology awareness. Reports `ResourceUnavailable`
/// when the intersection is too small.
pub struct BitmapIntersectionSelector;

impl NodeSelector for BitmapIntersectionSelector {
    fn select(&self, job: &Job, partition: &Partition, candidates: &NodeBitmap) -> SelectOutcome {
        let required = job.resources.clamped_min_nodes().max(1) as usize;
        let available = candidates.intersection(&partition.nodes);
        if available.count() < required {
            return SelectOutcome::ResourceUnavailable;
        }
        let chosen: Vec<usize> = available.indices().take(required).collect();
        SelectOutcome::Selected(NodeBitmap::from_indices(candidates.len(), chosen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResourceRequest;
    use crate::domain::value_objects::{JobId, Priority};

    fn job_needing(nodes: u32) -> Job {
        let mut job = Job::new(JobId::new(1), "j", 1, 1);
        job.resources = ResourceRequest::new(nodes, 1);
        job.priority = Priority::new(100);
        job
    }

    #[test]
    fn selects_intersection_when_sufficient() {
        let partition = Partition::new("batch", NodeBitmap::from_indices(8, [0, 1, 2, 3]), 32);
        let candidates = NodeBitmap::from_indices(8, [1, 2, 3, 4]);
        let outcome = BitmapIntersectionSelector.select(&job_needing(2), &partition, &candidates);
        match outcome {
            SelectOutcome::Selected(nodes) => assert_eq!(nodes.count(), 2),
            other => panic!("expected Selected, got {other:?}"),
        }
    }

    #[test]
    fn reports_resource_unavailable_when_intersection_too_small() {
        let partition = Partition::new("batch", NodeBitmap::from_indices(8, [0]), 8);
        let candidates = NodeBitmap::from_indices(8, [1, 2]);
        let outcome = BitmapIntersectionSelector.select(&job_needing(1), &partition, &candidates);
        assert_eq!(outcome, SelectOutcome::ResourceUnavailable);
    }
}
