//! Prolog/epilog lifecycle runner service
//!
//! Drives the detached prolog/epilog programs around a job's execution
//! (spec §4.7, grounded on `prolog_slurmctld`/`epilog_slurmctld`/
//! `_run_prolog`/`_run_epilog`/`_build_env`). Environment construction
//! merges the job's SPANK vars first so the job cannot use them to shadow
//! the vars this runner sets afterward. On a signal-killed prolog, the
//! job gets one retry (spec §4.7's failure policy) before being failed.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::value_objects::JobId;
use crate::infrastructure::process_runner::{ProcessRunner, RunOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleResult {
    Completed,
    Skipped,
    RetryScheduled,
    Failed,
}

pub struct LifecycleRunner;

impl LifecycleRunner {
    /// Builds the child environment for a prolog/epilog invocation: SPANK
    /// vars first, then the fixed scheduler-supplied vars, which always
    /// win on key collision.
    pub fn build_env(job_id: JobId, spank_env: &HashMap<String, String>) -> HashMap<String, String> {
        let mut env = spank_env.clone();
        env.insert("SCHEDULER_JOB_ID".to_string(), job_id.to_string());
        env
    }

    /// Runs `program` as the job's prolog. Returns `Skipped` if no program
    /// is configured, matching the original's no-op when
    /// `PrologSlurmctld` is unset.
    pub async fn run_prolog(
        program: Option<&str>,
        job_id: JobId,
        spank_env: &HashMap<String, String>,
        timeout: Duration,
        attempt: u32,
        max_retries: u32,
    ) -> LifecycleResult {
        let Some(program) = program else {
            return LifecycleResult::Skipped;
        };
        let env = Self::build_env(job_id, spank_env);
        let outcome = ProcessRunner::run(program, &[], &env, timeout).await;
        Self::interpret(job_id, "prolog", outcome, attempt, max_retries)
    }

    pub async fn run_epilog(
        program: Option<&str>,
        job_id: JobId,
        spank_env: &HashMap<String, String>,
        timeout: Duration,
        attempt: u32,
        max_retries: u32,
    ) -> LifecycleResult {
        let Some(program) = program else {
            return LifecycleResult::Skipped;
        };
        let env = Self::build_env(job_id, spank_env);
        let outcome = ProcessRunner::run(program, &[], &env, timeout).await;
        Self::interpret(job_id, "epilog", outcome, attempt, max_retries)
    }

    fn interpret(
        job_id: JobId,
        phase: &'static str,
        outcome: RunOutcome,
        attempt: u32,
        max_retries: u32,
    ) -> LifecycleResult {
        match outcome {
            RunOutcome::Exited { success: true } => {
                info!(%job_id, phase, "lifecycle program completed");
                LifecycleResult::Completed
            }
            RunOutcome::Exited { success: false } => {
                error!(%job_id, phase, "lifecycle program exited non-zero");
                LifecycleResult::Failed
            }
            RunOutcome::KilledBySignal if attempt < max_retries => {
                warn!(%job_id, phase, attempt, "lifecycle program killed by signal, retrying");
                LifecycleResult::RetryScheduled
            }
            RunOutcome::KilledBySignal => {
                error!(%job_id, phase, attempt, "lifecycle program killed by signal, retries exhausted");
                LifecycleResult::Failed
            }
            RunOutcome::TimedOut => {
                error!(%job_id, phase, "lifecycle program timed out");
                LifecycleResult::Failed
            }
            RunOutcome::FailedToSpawn => {
                error!(%job_id, phase, "lifecycle program failed to spawn");
                LifecycleResult::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spank_vars_are_overridable_by_fixed_vars() {
        let mut spank = HashMap::new();
        spank.insert("SCHEDULER_JOB_ID".to_string(), "bogus".to_string());
        let env = LifecycleRunner::build_env(JobId::new(7), &spank);
        assert_eq!(env.get("SCHEDULER_JOB_ID"), Some(&"7".to_string()));
    }

    #[tokio::test]
    async fn missing_program_is_skipped() {
        let result = LifecycleRunner::run_prolog(
            None,
            JobId::new(1),
            &HashMap::new(),
            Duration::from_secs(1),
            0,
            1,
        )
        .await;
        assert_eq!(result, LifecycleResult::Skipped);
    }

    #[tokio::test]
    async fn nonexistent_program_fails_to_spawn() {
        let result = LifecycleRunner::run_prolog(
            Some("/nonexistent/path/to/prolog"),
            JobId::new(1),
            &HashMap::new(),
            Duration::from_secs(1),
            0,
            1,
        )
        .await;
        assert_eq!(result, LifecycleResult::Failed);
    }
}
