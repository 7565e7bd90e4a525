pub mod credential;
pub mod dependency;
pub mod job;
pub mod partition;
pub mod queue_entry;
pub mod resource_request;

pub use credential::LaunchCredential;
pub use dependency::{DependencyKind, DependencyList, DependencySpec};
pub use job::Job;
pub use partition::Partition;
pub use queue_entry::JobQueueEntry;
pub use resource_request::{ResourceRequest, MAX_NODE_COUNT};
