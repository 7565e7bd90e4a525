//! Process runner
//!
//! Thin wrapper around `tokio::process::Command` used by the lifecycle
//! runner to spawn prolog/epilog children without holding any of the
//! central locks while awaiting exit (spec §5, grounded on `_run_prolog`
//! / `_run_epilog`).

use std::collections::HashMap;
use std::time::Duration;

use tokio::process::Command;
use tracing::warn;

/// Outcome of running a detached child to completion or timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Exited { success: bool },
    TimedOut,
    FailedToSpawn,
    KilledBySignal,
}

pub struct ProcessRunner;

impl ProcessRunner {
    /// Spawns `program` with `args` and `env`, waits up to `timeout` for
    /// exit. A signal-killed child (no exit code on unix) is reported as
    /// `KilledBySignal` rather than `Exited { success: false }` so the
    /// lifecycle runner can apply its one-retry policy only to that case.
    pub async fn run(
        program: &str,
        args: &[String],
        env: &HashMap<String, String>,
        timeout: Duration,
    ) -> RunOutcome {
        let mut command = Command::new(program);
        command.args(args);
        command.envs(env);
        command.kill_on_drop(true);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                warn!(program, error = %err, "failed to spawn lifecycle program");
                return RunOutcome::FailedToSpawn;
            }
        };

        match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) => {
                if status.success() {
                    RunOutcome::Exited { success: true }
                } else if status.code().is_none() {
                    RunOutcome::KilledBySignal
                } else {
                    RunOutcome::Exited { success: false }
                }
            }
            Ok(Err(err)) => {
                warn!(program, error = %err, "lifecycle program wait failed");
                RunOutcome::FailedToSpawn
            }
            Err(_) => {
                warn!(program, "lifecycle program timed out");
                RunOutcome::TimedOut
            }
        }
    }
}
