//! Build job queue use case
//!
//! Produces one `JobQueueEntry` per (pending, independent job, admissible
//! partition) pair, then sorts the result by priority (spec §4.1, grounded
//! on `build_job_queue`/`_job_queue_append`/`job_independent`).

use chrono::Utc;
use tracing::warn;

use crate::application::services::{DependencyEngine, DependencyStatus, PriorityComparator};
use crate::domain::entities::{Job, JobQueueEntry, Partition};
use crate::domain::repositories::JobDirectory;
use crate::domain::value_objects::{JobId, JobState, StateReason, StateReasonTag};

pub struct BuildJobQueue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQueueResult {
    pub entries: Vec<JobQueueEntry>,
}

impl BuildJobQueue {
    pub fn new() -> Self {
        Self
    }

    /// A job contributes queue entries only once it is independent: its
    /// dependency list is satisfied and its begin-time has passed. Held
    /// (priority 0) jobs are stamped `held` (unless already held by the
    /// user) and never queued; system-held (priority 1) jobs that are not
    /// independent are stamped `waiting-dependency`. `clear_start` zeroes a
    /// pending job's stale start time before independence is evaluated,
    /// mirroring `build_job_queue(clear_start)`'s reset of leftover
    /// predictor bookkeeping.
    pub fn execute(
        &self,
        clear_start: bool,
        directory: &mut dyn JobDirectory,
        partitions: &[&Partition],
    ) -> JobQueueResult {
        let engine = DependencyEngine::new();
        let now = Utc::now();

        let pending_ids: Vec<JobId> = directory
            .all()
            .into_iter()
            .filter(|j| j.state == JobState::Pending)
            .map(|j| j.id)
            .collect();

        let mut independent_ids = Vec::new();
        for id in pending_ids {
            if clear_start {
                if let Some(job) = directory.get_mut(id) {
                    job.start_time = None;
                }
            }

            let snapshot = match directory.get(id) {
                Some(job) => job.clone(),
                None => continue,
            };

            let dependencies_ok =
                matches!(engine.evaluate(&snapshot, directory), DependencyStatus::Satisfied);
            let begin_time_passed = snapshot.begin_time.map_or(true, |begin| begin <= now);
            let independent = dependencies_ok && begin_time_passed;

            if snapshot.priority.is_held() {
                if let Some(job) = directory.get_mut(id) {
                    let already_held_by_user =
                        matches!(&job.state_reason, Some(r) if r.tag == StateReasonTag::HeldByUser);
                    if !already_held_by_user {
                        job.state_reason = Some(StateReason::new(StateReasonTag::Held));
                    }
                }
                continue;
            }

            if snapshot.priority.is_system_held() && !independent {
                if let Some(job) = directory.get_mut(id) {
                    job.state_reason = Some(StateReason::new(StateReasonTag::WaitingDependency));
                }
            }

            if independent {
                independent_ids.push(id);
            }
        }

        let mut entries = Vec::new();
        for id in independent_ids {
            let snapshot = match directory.get(id) {
                Some(job) => job.clone(),
                None => continue,
            };
            let (job_entries, repair) = Self::entries_for_job(&snapshot, partitions);
            entries.extend(job_entries);
            if let Some(repaired_name) = repair {
                if let Some(job) = directory.get_mut(id) {
                    job.bound_partition = Some(repaired_name);
                }
            }
        }

        let job_refs = directory.all();
        PriorityComparator::sort_queue(&mut entries, &job_refs);
        JobQueueResult { entries }
    }

    /// Returns the entries one independent job contributes, plus a repaired
    /// `bound_partition` name if its previous binding had gone dangling.
    /// A job bound to more than one admissible partition gets one entry per
    /// partition that still exists; a single-partition job emits against
    /// its bound partition, falling back to its recorded partition name
    /// (and logging the repair) if the binding no longer resolves.
    fn entries_for_job(job: &Job, partitions: &[&Partition]) -> (Vec<JobQueueEntry>, Option<String>) {
        if job.partitions.len() > 1 {
            let entries = job
                .partitions
                .iter()
                .filter(|name| partitions.iter().any(|p| &p.name == *name))
                .map(|name| JobQueueEntry::new(job.id, name.clone(), job.priority))
                .collect();
            return (entries, None);
        }

        let bound = job.bound_partition.clone().or_else(|| job.partitions.first().cloned());
        match bound {
            Some(name) if partitions.iter().any(|p| p.name == name) => {
                (vec![JobQueueEntry::new(job.id, name, job.priority)], None)
            }
            Some(dangling) => {
                match job
                    .partitions
                    .first()
                    .filter(|name| *name != &dangling && partitions.iter().any(|p| &p.name == *name))
                {
                    Some(repaired) => {
                        warn!(
                            job_id = %job.id,
                            dangling = %dangling,
                            repaired = %repaired,
                            "bound partition no longer exists, repairing by name lookup"
                        );
                        (
                            vec![JobQueueEntry::new(job.id, repaired.clone(), job.priority)],
                            Some(repaired.clone()),
                        )
                    }
                    None => (Vec::new(), None),
                }
            }
            None => (Vec::new(), None),
        }
    }
}

impl Default for BuildJobQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DependencyKind, DependencyList, DependencySpec};
    use crate::domain::value_objects::{NodeBitmap, Priority};
    use crate::infrastructure::repositories::InMemoryJobDirectory;

    fn job(id: u32, priority: u32, partitions: Vec<&str>) -> Job {
        let mut j = Job::new(JobId::new(id), format!("j{id}"), 1, 1);
        j.priority = Priority::new(priority);
        j.partitions = partitions.into_iter().map(String::from).collect();
        j
    }

    #[test]
    fn only_pending_jobs_are_queued() {
        let mut dir = InMemoryJobDirectory::new();
        let mut running = job(1, 100, vec!["batch"]);
        running.state = JobState::Running;
        dir.insert(running).unwrap();
        dir.insert(job(2, 50, vec!["batch"])).unwrap();
        let batch = Partition::new("batch", NodeBitmap::full(4), 16);

        let result = BuildJobQueue::new().execute(false, &mut dir, &[&batch]);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].job_id, JobId::new(2));
    }

    #[test]
    fn multi_partition_job_gets_one_entry_per_partition() {
        let mut dir = InMemoryJobDirectory::new();
        dir.insert(job(1, 100, vec!["batch", "gpu"])).unwrap();
        let batch = Partition::new("batch", NodeBitmap::full(4), 16);
        let gpu = Partition::new("gpu", NodeBitmap::full(2), 8);

        let result = BuildJobQueue::new().execute(false, &mut dir, &[&batch, &gpu]);
        assert_eq!(result.entries.len(), 2);
    }

    #[test]
    fn entries_sort_by_priority_descending() {
        let mut dir = InMemoryJobDirectory::new();
        dir.insert(job(1, 10, vec!["batch"])).unwrap();
        dir.insert(job(2, 900, vec!["batch"])).unwrap();
        let batch = Partition::new("batch", NodeBitmap::full(4), 16);

        let result = BuildJobQueue::new().execute(false, &mut dir, &[&batch]);
        assert_eq!(result.entries[0].job_id, JobId::new(2));
    }

    #[test]
    fn held_job_is_stamped_and_excluded() {
        let mut dir = InMemoryJobDirectory::new();
        dir.insert(job(1, 0, vec!["batch"])).unwrap();
        let batch = Partition::new("batch", NodeBitmap::full(4), 16);

        let result = BuildJobQueue::new().execute(false, &mut dir, &[&batch]);
        assert!(result.entries.is_empty());
        assert_eq!(
            dir.get(JobId::new(1)).unwrap().state_reason.as_ref().unwrap().tag,
            StateReasonTag::Held
        );
    }

    #[test]
    fn already_held_by_user_is_not_overwritten() {
        let mut dir = InMemoryJobDirectory::new();
        let mut j = job(1, 0, vec!["batch"]);
        j.state_reason = Some(StateReason::new(StateReasonTag::HeldByUser));
        dir.insert(j).unwrap();
        let batch = Partition::new("batch", NodeBitmap::full(4), 16);

        BuildJobQueue::new().execute(false, &mut dir, &[&batch]);
        assert_eq!(
            dir.get(JobId::new(1)).unwrap().state_reason.as_ref().unwrap().tag,
            StateReasonTag::HeldByUser
        );
    }

    #[test]
    fn unsatisfied_dependency_is_skipped_and_not_queued() {
        let mut dir = InMemoryJobDirectory::new();
        let mut target = job(1, 100, vec!["batch"]);
        target.state = JobState::Running;
        dir.insert(target).unwrap();

        let mut dependent = job(2, 100, vec!["batch"]);
        dependent.dependencies =
            DependencyList::new(vec![DependencySpec::after(DependencyKind::AfterOk, JobId::new(1))]);
        dir.insert(dependent).unwrap();

        let batch = Partition::new("batch", NodeBitmap::full(4), 16);
        let result = BuildJobQueue::new().execute(false, &mut dir, &[&batch]);
        assert!(result.entries.is_empty());
    }

    #[test]
    fn system_held_and_not_independent_is_stamped_waiting_dependency() {
        let mut dir = InMemoryJobDirectory::new();
        let mut target = job(1, 100, vec!["batch"]);
        target.state = JobState::Running;
        dir.insert(target).unwrap();

        let mut dependent = job(2, 1, vec!["batch"]);
        dependent.dependencies =
            DependencyList::new(vec![DependencySpec::after(DependencyKind::AfterOk, JobId::new(1))]);
        dir.insert(dependent).unwrap();

        let batch = Partition::new("batch", NodeBitmap::full(4), 16);
        let result = BuildJobQueue::new().execute(false, &mut dir, &[&batch]);
        assert!(result.entries.is_empty());
        assert_eq!(
            dir.get(JobId::new(2)).unwrap().state_reason.as_ref().unwrap().tag,
            StateReasonTag::WaitingDependency
        );
    }

    #[test]
    fn unreached_begin_time_is_not_independent() {
        let mut dir = InMemoryJobDirectory::new();
        let mut j = job(1, 100, vec!["batch"]);
        j.begin_time = Some(Utc::now() + chrono::Duration::hours(1));
        dir.insert(j).unwrap();

        let batch = Partition::new("batch", NodeBitmap::full(4), 16);
        let result = BuildJobQueue::new().execute(false, &mut dir, &[&batch]);
        assert!(result.entries.is_empty());
    }

    #[test]
    fn clear_start_zeroes_a_pending_jobs_start_time() {
        let mut dir = InMemoryJobDirectory::new();
        let mut j = job(1, 100, vec!["batch"]);
        j.start_time = Some(Utc::now());
        dir.insert(j).unwrap();
        let batch = Partition::new("batch", NodeBitmap::full(4), 16);

        BuildJobQueue::new().execute(true, &mut dir, &[&batch]);
        assert!(dir.get(JobId::new(1)).unwrap().start_time.is_none());
    }

    #[test]
    fn dangling_bound_partition_is_repaired_from_the_jobs_partition_list() {
        let mut dir = InMemoryJobDirectory::new();
        let mut j = job(1, 100, vec!["batch"]);
        j.bound_partition = Some("retired".to_string());
        dir.insert(j).unwrap();
        let batch = Partition::new("batch", NodeBitmap::full(4), 16);

        let result = BuildJobQueue::new().execute(false, &mut dir, &[&batch]);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].partition_name, "batch");
        assert_eq!(dir.get(JobId::new(1)).unwrap().bound_partition.as_deref(), Some("batch"));
    }
}
