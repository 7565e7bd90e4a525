pub mod build_feature_list;
pub mod build_job_queue;
pub mod job_start_data;
pub mod launch_job;
pub mod prolog_epilog;
pub mod schedule;
pub mod test_job_dependency;
pub mod update_job_dependency;

pub use build_feature_list::BuildFeatureList;
pub use build_job_queue::{BuildJobQueue, JobQueueResult};
pub use job_start_data::JobStartData;
pub use launch_job::LaunchJob;
pub use prolog_epilog::PrologEpilog;
pub use schedule::Schedule;
pub use test_job_dependency::TestJobDependency;
pub use update_job_dependency::UpdateJobDependency;
