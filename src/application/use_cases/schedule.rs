//! Schedule use case — the main dispatch loop
//!
//! One pass over the job queue, gating each entry through the checks
//! `schedule()` performs in the original scheduler: pending re-check,
//! held skip, partition rebind, failed-partition masking, resource
//! overlap, license test, association validation, then node selection.
//! A successful selection dispatches the job and reorders its partition
//! list; a resource-exhausted partition is marked failed for the rest of
//! this pass so later entries in it short-circuit without re-testing.

use std::collections::HashSet;

use tracing::{debug, info, trace};

use crate::application::use_cases::BuildJobQueue;
use crate::domain::value_objects::{JobState, StateReason, StateReasonTag};
use crate::infrastructure::context::SchedulerContext;
use crate::infrastructure::error::{DispatchOutcome, SelectOutcome};
use crate::domain::repositories::JobDirectory;
use crate::domain::repositories::PartitionDirectory;

pub struct Schedule {
    pub job_limit: usize,
}

impl Schedule {
    pub fn new(job_limit: usize) -> Self {
        Self { job_limit }
    }

    pub async fn execute(&self, ctx: &SchedulerContext) -> Vec<DispatchOutcome> {
        let started = std::time::Instant::now();
        let mut locks = ctx.locks().dispatch_locks().await;
        let mut outcomes = Vec::new();
        let mut failed_partitions: HashSet<String> = HashSet::new();

        let complete_wait = locks.config.complete_wait();
        let now = chrono::Utc::now();
        let completing = locks.jobs.all().iter().any(|job| {
            job.state.is_completing()
                && job
                    .end_time
                    .map(|end| now.signed_duration_since(end).num_seconds() < complete_wait.as_secs() as i64)
                    .unwrap_or(true)
        });
        if completing {
            debug!("schedule: some job is still completing, deferring pass");
            return outcomes;
        }

        let default_depth = locks.config.default_queue_depth();
        let mut job_limit = if self.job_limit == 0 {
            default_depth.unwrap_or(usize::MAX)
        } else {
            self.job_limit
        };
        if let Some(depth) = default_depth {
            job_limit = job_limit.min(depth);
        }
        let sched_timeout = locks.config.sched_timeout();

        let partition_refs = locks.partitions.all();
        let queue = BuildJobQueue::new().execute(false, &mut *locks.jobs, &partition_refs);
        drop(partition_refs);

        for entry in queue.entries.into_iter().take(job_limit) {
            if started.elapsed() >= sched_timeout {
                debug!("schedule: sched_timeout exceeded, ending pass early");
                break;
            }
            let partition = match locks.partitions.get(&entry.partition_name) {
                Some(p) => p.clone(),
                None => continue,
            };

            let Some(job) = locks.jobs.get_mut(entry.job_id) else {
                continue;
            };

            if job.state != JobState::Pending {
                trace!(job_id = %job.id, "already started in another partition, skipping");
                continue;
            }
            if job.is_held() {
                trace!(job_id = %job.id, priority = %job.priority, "job is held, skipping");
                outcomes.push(DispatchOutcome::Skipped {
                    job_id: job.id,
                    reason: StateReasonTag::Held,
                });
                continue;
            }

            job.bound_partition = Some(partition.name.clone());

            if !partition.scheduling_enabled || failed_partitions.contains(&partition.name) {
                if !job.is_system_held() {
                    job.state_reason = Some(StateReason::new(StateReasonTag::WaitingPriority));
                }
                outcomes.push(DispatchOutcome::Skipped {
                    job_id: job.id,
                    reason: StateReasonTag::WaitingPriority,
                });
                continue;
            }

            if partition.nodes.is_disjoint(&locks.nodes) {
                job.state_reason = Some(StateReason::new(StateReasonTag::WaitingResources));
                outcomes.push(DispatchOutcome::Skipped {
                    job_id: job.id,
                    reason: StateReasonTag::WaitingResources,
                });
                continue;
            }

            if !ctx.ports.license_engine.test(job) {
                job.state_reason = Some(StateReason::new(StateReasonTag::WaitingLicenses));
                outcomes.push(DispatchOutcome::Skipped {
                    job_id: job.id,
                    reason: StateReasonTag::WaitingLicenses,
                });
                continue;
            }

            if let Some(reservation) = job.resources.reservation_name.clone() {
                if !ctx.ports.reservation_engine.test_reservation(job, &reservation) {
                    outcomes.push(DispatchOutcome::Deferred { job_id: job.id });
                    continue;
                }
            }

            if !ctx.ports.association_validator.validate(job, &partition.name) {
                info!(job_id = %job.id, "job has invalid account association, failing");
                job.state = JobState::Failed;
                job.state_reason = Some(StateReason::new(StateReasonTag::FailedAccount));
                job.end_time = Some(chrono::Utc::now());
                outcomes.push(DispatchOutcome::Skipped {
                    job_id: job.id,
                    reason: StateReasonTag::FailedAccount,
                });
                continue;
            }

            let candidates = locks.nodes.intersection(&partition.nodes);
            match ctx.ports.node_selector.select(job, &partition, &candidates) {
                SelectOutcome::Selected(selected) => {
                    job.state = JobState::Running;
                    job.start_time = Some(chrono::Utc::now());
                    job.rebuild_partition_list(&partition.name);
                    *locks.nodes = locks.nodes.subtract(&selected);
                    info!(job_id = %job.id, partition = %partition.name, "job dispatched");
                    outcomes.push(DispatchOutcome::Dispatched {
                        job_id: job.id,
                        partition: partition.name.clone(),
                    });
                }
                SelectOutcome::ResourceUnavailable => {
                    failed_partitions.insert(partition.name.clone());
                    job.state_reason = Some(StateReason::new(StateReasonTag::WaitingResources));
                    outcomes.push(DispatchOutcome::Skipped {
                        job_id: job.id,
                        reason: StateReasonTag::WaitingResources,
                    });
                }
                SelectOutcome::ReservationConflict => {
                    outcomes.push(DispatchOutcome::Deferred { job_id: job.id });
                }
                SelectOutcome::LicenseUnavailable => {
                    job.state_reason = Some(StateReason::new(StateReasonTag::WaitingLicenses));
                    outcomes.push(DispatchOutcome::Skipped {
                        job_id: job.id,
                        reason: StateReasonTag::WaitingLicenses,
                    });
                }
                SelectOutcome::AssociationInvalid => {
                    job.state = JobState::Failed;
                    job.state_reason = Some(StateReason::new(StateReasonTag::FailedAccount));
                    outcomes.push(DispatchOutcome::Skipped {
                        job_id: job.id,
                        reason: StateReasonTag::FailedAccount,
                    });
                }
                SelectOutcome::PartitionDown => {
                    job.state = JobState::Failed;
                    job.state_reason = Some(StateReason::new(StateReasonTag::FailedBadConstraints));
                    outcomes.push(DispatchOutcome::Skipped {
                        job_id: job.id,
                        reason: StateReasonTag::FailedBadConstraints,
                    });
                }
            }
        }

        let dispatched = outcomes
            .iter()
            .filter(|o| matches!(o, DispatchOutcome::Dispatched { .. }))
            .count();
        info!(
            dispatched,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "schedule pass complete"
        );
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Job, Partition, ResourceRequest};
    use crate::domain::ports::{
        AssociationValidator, CredentialSigner, LicenseEngine, NodeSelector, OutboundAgent,
        PreemptionEngine, ReservationEngine,
    };
    use crate::domain::value_objects::{JobId, NodeBitmap, Priority};
    use crate::infrastructure::config::SchedulerConfig;
    use crate::infrastructure::context::PluginPorts;
    use std::sync::Arc;

    struct AlwaysSelect;
    impl NodeSelector for AlwaysSelect {
        fn select(
            &self,
            _job: &Job,
            _partition: &Partition,
            candidates: &NodeBitmap,
        ) -> SelectOutcome {
            SelectOutcome::Selected(candidates.clone())
        }
    }
    struct AlwaysDeny;
    impl NodeSelector for AlwaysDeny {
        fn select(&self, _: &Job, _: &Partition, _: &NodeBitmap) -> SelectOutcome {
            SelectOutcome::ResourceUnavailable
        }
    }
    struct Permit;
    impl ReservationEngine for Permit {
        fn test_reservation(&self, _: &Job, _: &str) -> bool {
            true
        }
    }
    struct Allow;
    impl LicenseEngine for Allow {
        fn test(&self, _: &Job) -> bool {
            true
        }
    }
    struct NoPreempt;
    impl PreemptionEngine for NoPreempt {
        fn find_preemptable(&self, _: &Job, _: &[Job]) -> Vec<JobId> {
            Vec::new()
        }
    }
    struct Valid;
    impl AssociationValidator for Valid {
        fn validate(&self, _: &Job, _: &str) -> bool {
            true
        }
    }
    struct Sign;
    impl CredentialSigner for Sign {
        fn sign(
            &self,
            _: &crate::domain::entities::LaunchCredential,
        ) -> Result<String, crate::infrastructure::error::SchedulerError> {
            Ok("sig".to_string())
        }
    }
    struct DropAgent;
    impl OutboundAgent for DropAgent {
        fn enqueue(
            &self,
            _: crate::domain::ports::AgentMessage,
        ) -> Result<(), crate::infrastructure::error::SchedulerError> {
            Ok(())
        }
    }

    fn context(selector: Arc<dyn NodeSelector>) -> SchedulerContext {
        SchedulerContext::new(
            8,
            SchedulerConfig::default(),
            PluginPorts {
                node_selector: selector,
                reservation_engine: Arc::new(Permit),
                license_engine: Arc::new(Allow),
                preemption_engine: Arc::new(NoPreempt),
                association_validator: Arc::new(Valid),
                credential_signer: Arc::new(Sign),
                outbound_agent: Arc::new(DropAgent),
            },
        )
    }

    #[tokio::test]
    async fn dispatches_a_runnable_job() {
        let ctx = context(Arc::new(AlwaysSelect));
        {
            let mut jobs = ctx.jobs.write().await;
            let mut job = Job::new(JobId::new(1), "sim", 1, 1);
            job.priority = Priority::new(100);
            job.partitions = vec!["batch".into()];
            job.resources = ResourceRequest::new(1, 1);
            jobs.insert(job).unwrap();
        }
        {
            let mut partitions = ctx.partitions.write().await;
            partitions
                .insert(Partition::new("batch", NodeBitmap::full(8), 32))
                .unwrap();
        }

        let outcomes = Schedule::new(100).execute(&ctx).await;
        assert!(outcomes
            .iter()
            .any(|o| matches!(o, DispatchOutcome::Dispatched { .. })));

        let jobs = ctx.jobs.read().await;
        assert_eq!(jobs.get(JobId::new(1)).unwrap().state, JobState::Running);
    }

    #[tokio::test]
    async fn held_job_never_dispatches() {
        let ctx = context(Arc::new(AlwaysSelect));
        {
            let mut jobs = ctx.jobs.write().await;
            let mut job = Job::new(JobId::new(1), "sim", 1, 1);
            job.priority = Priority::new(0);
            job.partitions = vec!["batch".into()];
            jobs.insert(job).unwrap();
        }
        {
            let mut partitions = ctx.partitions.write().await;
            partitions
                .insert(Partition::new("batch", NodeBitmap::full(8), 32))
                .unwrap();
        }

        let outcomes = Schedule::new(100).execute(&ctx).await;
        assert!(matches!(
            outcomes[0],
            DispatchOutcome::Skipped {
                reason: StateReasonTag::Held,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn resource_unavailable_marks_partition_failed_for_pass() {
        let ctx = context(Arc::new(AlwaysDeny));
        {
            let mut jobs = ctx.jobs.write().await;
            for id in [1u32, 2] {
                let mut job = Job::new(JobId::new(id), format!("sim{id}"), 1, 1);
                job.priority = Priority::new(100);
                job.partitions = vec!["batch".into()];
                jobs.insert(job).unwrap();
            }
        }
        {
            let mut partitions = ctx.partitions.write().await;
            partitions
                .insert(Partition::new("batch", NodeBitmap::full(8), 32))
                .unwrap();
        }

        let outcomes = Schedule::new(100).execute(&ctx).await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, DispatchOutcome::Skipped { .. })));
    }
}
