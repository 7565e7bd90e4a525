//! Launch job use case
//!
//! Builds a `LaunchCredential` for a freshly-dispatched job, signs it via
//! the `CredentialSigner` port, and enqueues an `AgentMessage` through the
//! `OutboundAgent` port (spec §4.7, grounded on `launch_job`/
//! `make_batch_job_cred`). Never holds a directory lock while the agent
//! queue is touched: `enqueue` must stay non-blocking.

use crate::domain::entities::LaunchCredential;
use crate::domain::ports::AgentMessage;
use crate::domain::value_objects::{JobId, NodeBitmap};
use crate::infrastructure::context::SchedulerContext;
use crate::infrastructure::error::SchedulerError;
use crate::domain::repositories::JobDirectory;

pub struct LaunchJob;

impl LaunchJob {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &self,
        ctx: &SchedulerContext,
        job_id: JobId,
        hostlist: Vec<String>,
        core_bitmap: NodeBitmap,
    ) -> Result<(), SchedulerError> {
        let (uid, gid, gres) = {
            let jobs = ctx.jobs.read().await;
            let job = jobs.get(job_id).ok_or(SchedulerError::InvalidJobId(job_id))?;
            (job.uid, job.gid, job.resources.gres.clone())
        };

        let mut credential = LaunchCredential::new(job_id, 0, uid, gid, hostlist.clone(), core_bitmap);
        credential.gres = gres;

        let signed = ctx.ports.credential_signer.sign(&credential)?;

        ctx.ports.outbound_agent.enqueue(AgentMessage {
            job_id,
            target_nodes: hostlist,
            signed_credential: signed,
        })
    }
}

impl Default for LaunchJob {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Job, Partition};
    use crate::domain::ports::{
        AssociationValidator, CredentialSigner, LicenseEngine, NodeSelector, OutboundAgent,
        PreemptionEngine, ReservationEngine,
    };
    use crate::infrastructure::config::SchedulerConfig;
    use crate::infrastructure::context::PluginPorts;
    use crate::infrastructure::error::SelectOutcome;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct Noop;
    impl NodeSelector for Noop {
        fn select(&self, _: &Job, _: &Partition, c: &NodeBitmap) -> SelectOutcome {
            SelectOutcome::Selected(c.clone())
        }
    }
    impl ReservationEngine for Noop {
        fn test_reservation(&self, _: &Job, _: &str) -> bool {
            true
        }
    }
    impl LicenseEngine for Noop {
        fn test(&self, _: &Job) -> bool {
            true
        }
    }
    impl PreemptionEngine for Noop {
        fn find_preemptable(&self, _: &Job, _: &[Job]) -> Vec<JobId> {
            Vec::new()
        }
    }
    impl AssociationValidator for Noop {
        fn validate(&self, _: &Job, _: &str) -> bool {
            true
        }
    }
    impl CredentialSigner for Noop {
        fn sign(&self, credential: &LaunchCredential) -> Result<String, SchedulerError> {
            Ok(format!("signed:{}", credential.job_id))
        }
    }

    struct RecordingAgent {
        called: AtomicBool,
    }
    impl OutboundAgent for RecordingAgent {
        fn enqueue(&self, message: AgentMessage) -> Result<(), SchedulerError> {
            assert!(message.signed_credential.starts_with("signed:"));
            self.called.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn signs_and_enqueues_the_launch() {
        let agent = Arc::new(RecordingAgent {
            called: AtomicBool::new(false),
        });
        let ctx = SchedulerContext::new(
            8,
            SchedulerConfig::default(),
            PluginPorts {
                node_selector: Arc::new(Noop),
                reservation_engine: Arc::new(Noop),
                license_engine: Arc::new(Noop),
                preemption_engine: Arc::new(Noop),
                association_validator: Arc::new(Noop),
                credential_signer: Arc::new(Noop),
                outbound_agent: agent.clone(),
            },
        );
        {
            let mut jobs = ctx.jobs.write().await;
            jobs.insert(Job::new(JobId::new(1), "sim", 1000, 1000)).unwrap();
        }

        LaunchJob::new()
            .execute(&ctx, JobId::new(1), vec!["node01".into()], NodeBitmap::full(8))
            .await
            .unwrap();

        assert!(agent.called.load(Ordering::SeqCst));
    }
}
