//! Priority comparator service
//!
//! The total order the queue builder sorts entries by before a dispatch
//! pass walks them: higher priority first, submit time as tiebreaker
//! (earlier wins), matching `sort_job_queue`/`sort_job_queue2`'s intent
//! without reproducing their multi-key partition-aware tie-breaking in
//! full — this crate has one partition dimension per queue entry already,
//! so there is nothing left to break the tie on beyond submit time.

use std::cmp::Ordering;

use crate::domain::entities::{Job, JobQueueEntry};

pub struct PriorityComparator;

impl PriorityComparator {
    /// Orders two queue entries for dispatch: higher `Priority` sorts
    /// first. Held (`0`) and system-held (`1`) jobs always sort after any
    /// ordinary priority, since a job with priority 0 or 1 should not be
    /// considered a real contender regardless of how it compares
    /// numerically to another held job.
    pub fn compare_entries(a: &JobQueueEntry, b: &JobQueueEntry, jobs: &[&Job]) -> Ordering {
        let job_a = jobs.iter().find(|j| j.id == a.job_id);
        let job_b = jobs.iter().find(|j| j.id == b.job_id);

        match (job_a, job_b) {
            (Some(ja), Some(jb)) => Self::compare_jobs(ja, jb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    pub fn compare_jobs(a: &Job, b: &Job) -> Ordering {
        match (a.is_held() || a.is_system_held(), b.is_held() || b.is_system_held()) {
            (true, true) => a.submit_time.cmp(&b.submit_time),
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => b
                .priority
                .cmp(&a.priority)
                .then_with(|| a.submit_time.cmp(&b.submit_time)),
        }
    }

    /// Sorts a queue in place, highest-priority-first.
    pub fn sort_queue(entries: &mut [JobQueueEntry], jobs: &[&Job]) {
        entries.sort_by(|a, b| Self::compare_entries(a, b, jobs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{JobId, Priority};

    fn job(id: u32, priority: u32) -> Job {
        let mut job = Job::new(JobId::new(id), format!("j{id}"), 1, 1);
        job.priority = Priority::new(priority);
        job
    }

    #[test]
    fn higher_priority_sorts_first() {
        let a = job(1, 100);
        let b = job(2, 500);
        assert_eq!(PriorityComparator::compare_jobs(&b, &a), Ordering::Less);
    }

    #[test]
    fn held_jobs_sort_after_any_ordinary_priority() {
        let held = job(1, 0);
        let ordinary = job(2, 1);
        assert_eq!(
            PriorityComparator::compare_jobs(&held, &ordinary),
            Ordering::Greater
        );
    }

    #[test]
    fn ties_break_on_earlier_submit_time() {
        let mut a = job(1, 100);
        let mut b = job(2, 100);
        a.submit_time = chrono::Utc::now() - chrono::Duration::seconds(10);
        b.submit_time = chrono::Utc::now();
        assert_eq!(PriorityComparator::compare_jobs(&a, &b), Ordering::Less);
    }
}
