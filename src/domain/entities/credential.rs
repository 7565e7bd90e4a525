//! Launch credential entity module
//!
//! The signed bundle handed to the outbound agent when launching a job
//! (spec §4.7, grounded on `make_batch_job_cred` in job_scheduler.c). The
//! signature itself is produced by the `CredentialSigner` port; this type
//! is the plain-data payload that gets signed.

use serde::{Deserialize, Serialize};

use super::super::value_objects::{JobId, NodeBitmap};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchCredential {
    pub job_id: JobId,
    pub step_id: u32,
    pub uid: u32,
    pub gid: u32,
    pub hostlist: Vec<String>,
    pub core_bitmap: NodeBitmap,
    pub memory_limit_mb: u64,
    pub gres: Vec<String>,
    pub cores_per_socket: u32,
    pub sockets_per_node: u32,
}

impl LaunchCredential {
    pub fn new(
        job_id: JobId,
        step_id: u32,
        uid: u32,
        gid: u32,
        hostlist: Vec<String>,
        core_bitmap: NodeBitmap,
    ) -> Self {
        Self {
            job_id,
            step_id,
            uid,
            gid,
            hostlist,
            core_bitmap,
            memory_limit_mb: 0,
            gres: Vec::new(),
            cores_per_socket: 1,
            sockets_per_node: 1,
        }
    }

    pub fn node_count(&self) -> usize {
        self.hostlist.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_count_follows_hostlist() {
        let cred = LaunchCredential::new(
            JobId::new(1),
            0,
            100,
            100,
            vec!["node01".into(), "node02".into()],
            NodeBitmap::from_indices(8, [0, 1]),
        );
        assert_eq!(cred.node_count(), 2);
    }
}
