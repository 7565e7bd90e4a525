pub mod agent_queue;
pub mod config;
pub mod context;
pub mod error;
pub mod locks;
pub mod process_runner;
pub mod repositories;

pub use agent_queue::MpscAgentQueue;
pub use config::SchedulerConfig;
pub use context::{PluginPorts, SchedulerContext};
pub use error::{DispatchOutcome, SchedulerError, SelectOutcome};
pub use locks::LockSet;
pub use process_runner::{ProcessRunner, RunOutcome};
