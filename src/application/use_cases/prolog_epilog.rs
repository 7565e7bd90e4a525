//! Prolog/epilog use case
//!
//! Runs a job's prolog or epilog program through the `LifecycleRunner`
//! service within a `SchedulerContext`, applying the retry-count policy and
//! writing the outcome back onto the job (spec §4.7). The read-only
//! `prolog_prepare_locks` guard set is dropped before the child process is
//! awaited so other scheduling work is never blocked on a slow prolog.

use crate::application::services::{LifecycleResult, LifecycleRunner};
use crate::domain::value_objects::JobId;
use crate::infrastructure::context::SchedulerContext;
use crate::infrastructure::error::SchedulerError;
use crate::domain::repositories::JobDirectory;

pub enum Phase {
    Prolog,
    Epilog,
}

pub struct PrologEpilog;

impl PrologEpilog {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &self,
        ctx: &SchedulerContext,
        job_id: JobId,
        phase: Phase,
    ) -> Result<LifecycleResult, SchedulerError> {
        let (program, spank_env, timeout, max_retries, attempt) = {
            let locks = ctx.locks().prolog_prepare_locks().await;
            let job = locks
                .jobs
                .get(job_id)
                .ok_or(SchedulerError::InvalidJobId(job_id))?;
            let program = match phase {
                Phase::Prolog => locks.config.prolog_program_path.clone(),
                Phase::Epilog => locks.config.epilog_program_path.clone(),
            };
            (
                program,
                job.spank_env.clone(),
                locks.config.message_timeout(),
                locks.config.max_prolog_retries,
                job.restart_count,
            )
        };

        let result = match phase {
            Phase::Prolog => {
                LifecycleRunner::run_prolog(
                    program.as_deref(),
                    job_id,
                    &spank_env,
                    timeout,
                    attempt,
                    max_retries,
                )
                .await
            }
            Phase::Epilog => {
                LifecycleRunner::run_epilog(
                    program.as_deref(),
                    job_id,
                    &spank_env,
                    timeout,
                    attempt,
                    max_retries,
                )
                .await
            }
        };

        let mut jobs = ctx.jobs.write().await;
        if let Some(job) = jobs.get_mut(job_id) {
            match result {
                LifecycleResult::RetryScheduled => job.restart_count += 1,
                LifecycleResult::Failed => {
                    job.state = crate::domain::value_objects::JobState::Failed;
                    job.end_time = Some(chrono::Utc::now());
                }
                LifecycleResult::Completed | LifecycleResult::Skipped => {}
            }
        }

        Ok(result)
    }
}

impl Default for PrologEpilog {
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
    use crate::domain::value_objects::{JobState, NodeBitmap};
    use crate::infrastructure::config::SchedulerConfig;
    use crate::infrastructure::context::PluginPorts;
    use crate::infrastructure::error::SelectOutcome;
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
        fn sign(
            &self,
            _: &crate::domain::entities::LaunchCredential,
        ) -> Result<String, SchedulerError> {
            Ok("sig".to_string())
        }
    }
    impl OutboundAgent for Noop {
        fn enqueue(&self, _: crate::domain::ports::AgentMessage) -> Result<(), SchedulerError> {
            Ok(())
        }
    }

    fn context(config: SchedulerConfig) -> SchedulerContext {
        SchedulerContext::new(
            4,
            config,
            PluginPorts {
                node_selector: Arc::new(Noop),
                reservation_engine: Arc::new(Noop),
                license_engine: Arc::new(Noop),
                preemption_engine: Arc::new(Noop),
                association_validator: Arc::new(Noop),
                credential_signer: Arc::new(Noop),
                outbound_agent: Arc::new(Noop),
            },
        )
    }

    #[tokio::test]
    async fn no_program_configured_is_skipped_and_leaves_job_untouched() {
        let ctx = context(SchedulerConfig::default());
        {
            let mut jobs = ctx.jobs.write().await;
            jobs.insert(Job::new(JobId::new(1), "sim", 1, 1)).unwrap();
        }

        let result = PrologEpilog::new().execute(&ctx, JobId::new(1), Phase::Prolog).await.unwrap();
        assert_eq!(result, LifecycleResult::Skipped);

        let jobs = ctx.jobs.read().await;
        assert_eq!(jobs.get(JobId::new(1)).unwrap().state, JobState::Pending);
    }

    #[tokio::test]
    async fn failed_to_spawn_program_fails_the_job() {
        let mut config = SchedulerConfig::default();
        config.prolog_program_path = Some("/nonexistent/path/to/prolog".to_string());
        let ctx = context(config);
        {
            let mut jobs = ctx.jobs.write().await;
            jobs.insert(Job::new(JobId::new(1), "sim", 1, 1)).unwrap();
        }

        let result = PrologEpilog::new().execute(&ctx, JobId::new(1), Phase::Prolog).await.unwrap();
        assert_eq!(result, LifecycleResult::Failed);

        let jobs = ctx.jobs.read().await;
        assert_eq!(jobs.get(JobId::new(1)).unwrap().state, JobState::Failed);
    }
}
