//! Scheduler configuration module
//!
//! Environment-driven configuration, following the shape of jobweaver's
//! `WebConfig`: a plain struct with a `Default` impl for baseline values
//! and a loader that overlays values from the process environment (after
//! `dotenvy` has had a chance to populate it from a `.env` file).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Runtime configuration read by `SchedulerContext` at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub prolog_program_path: Option<String>,
    pub epilog_program_path: Option<String>,
    pub complete_wait_seconds: u64,
    pub message_timeout_seconds: u64,
    pub scheduler_type: String,
    pub scheduler_params: String,
    pub max_prolog_retries: u32,
}

impl Default for SchedulerConfig {
    /// - complete-wait: 5s (matches the original's fragmentation-avoidance
    ///   default window)
    /// - message timeout: 10s
    /// - scheduler type: "builtin"
    /// - one prolog retry before the job is killed, per spec §4.7
    fn default() -> Self {
        Self {
            prolog_program_path: None,
            epilog_program_path: None,
            complete_wait_seconds: 5,
            message_timeout_seconds: 10,
            scheduler_type: "builtin".to_string(),
            scheduler_params: String::new(),
            max_prolog_retries: 1,
        }
    }
}

impl SchedulerConfig {
    /// Loads a `.env` file if present, then overlays environment variables
    /// onto the defaults. Unset variables leave the default in place.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        if let Ok(v) = std::env::var("SCHED_PROLOG_PATH") {
            config.prolog_program_path = Some(v);
        }
        if let Ok(v) = std::env::var("SCHED_EPILOG_PATH") {
            config.epilog_program_path = Some(v);
        }
        if let Ok(v) = std::env::var("SCHED_COMPLETE_WAIT_SECONDS") {
            if let Ok(parsed) = v.parse() {
                config.complete_wait_seconds = parsed;
            }
        }
        if let Ok(v) = std::env::var("SCHED_MESSAGE_TIMEOUT_SECONDS") {
            if let Ok(parsed) = v.parse() {
                config.message_timeout_seconds = parsed;
            }
        }
        if let Ok(v) = std::env::var("SCHED_TYPE") {
            config.scheduler_type = v;
        }
        if let Ok(v) = std::env::var("SCHED_PARAMS") {
            config.scheduler_params = v;
        }
        if let Ok(v) = std::env::var("SCHED_MAX_PROLOG_RETRIES") {
            if let Ok(parsed) = v.parse() {
                config.max_prolog_retries = parsed;
            }
        }

        config
    }

    pub fn complete_wait(&self) -> Duration {
        Duration::from_secs(self.complete_wait_seconds)
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_seconds)
    }

    /// Parses `default_queue_depth=N` out of `scheduler_params` (spec
    /// §4.5). A negative or unparseable value is ignored with a warning
    /// rather than rejected outright, matching the original's tolerance of
    /// a malformed `SchedulerParameters` entry.
    pub fn default_queue_depth(&self) -> Option<usize> {
        for param in self.scheduler_params.split(',') {
            let Some(value) = param.trim().strip_prefix("default_queue_depth=") else {
                continue;
            };
            match value.parse::<i64>() {
                Ok(n) if n >= 0 => return Some(n as usize),
                _ => {
                    tracing::warn!(value, "ignoring invalid default_queue_depth in scheduler_params");
                    return None;
                }
            }
        }
        None
    }

    /// The per-pass wall-clock budget the dispatch loop enforces, derived
    /// from `message_timeout_seconds` and clamped to `[1, 10]` seconds
    /// (spec §4.5, §8).
    pub fn sched_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_seconds.clamp(1, 10))
    }
}
