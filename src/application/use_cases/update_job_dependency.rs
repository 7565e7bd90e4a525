//! Update job dependency use case
//!
//! Parses a raw dependency string (`"afterok:3,after:4,singleton"`) into a
//! `DependencyList` and rewrites a job's list with it (spec §4.2/§6,
//! grounded on `update_job_dependency`/`_scan_depend`). Each comma-separated
//! term is either a bare kind name (singleton), `kind:target_id`, or the
//! legacy bare decimal id (rewritten as `afterany:id`). An empty string or a
//! single `0` clears all dependencies. A term referencing the job's own id
//! is rejected, and the proposed list is rejected wholesale if assigning it
//! would introduce a dependency cycle (spec §8 Scenario 2).

use crate::application::services::DependencyEngine;
use crate::domain::entities::{DependencyKind, DependencyList, DependencySpec, Job};
use crate::domain::repositories::JobDirectory;
use crate::domain::value_objects::JobId;
use crate::infrastructure::error::SchedulerError;

pub struct UpdateJobDependency;

impl UpdateJobDependency {
    pub fn new() -> Self {
        Self
    }

    /// Parses `raw` into a dependency list. `owner` is the id of the job the
    /// list will be assigned to, used to reject self-referencing terms.
    pub fn parse_list(raw: &str, owner: JobId) -> Result<DependencyList, SchedulerError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "0" {
            return Ok(DependencyList::default());
        }

        let mut specs = Vec::new();
        for term in trimmed.split(',') {
            specs.push(Self::parse_term(term, owner)?);
        }
        Ok(DependencyList::new(specs))
    }

    fn parse_term(term: &str, owner: JobId) -> Result<DependencySpec, SchedulerError> {
        let term = term.trim();

        if let Ok(legacy_id) = term.parse::<u32>() {
            let target = JobId::new(legacy_id);
            Self::reject_self_reference(target, owner, term)?;
            return Ok(DependencySpec::after(DependencyKind::AfterAny, target));
        }

        let mut parts = term.splitn(2, ':');
        let kind_str = parts.next().unwrap_or("").trim();
        let kind = Self::parse_kind(kind_str)?;

        match (kind, parts.next()) {
            (DependencyKind::Singleton, None) => Ok(DependencySpec::singleton()),
            (DependencyKind::Singleton, Some(_)) => Err(SchedulerError::Dependency(format!(
                "singleton dependency takes no target: {term}"
            ))),
            (_, Some(target_str)) => {
                let target: u32 = target_str
                    .trim()
                    .parse()
                    .map_err(|_| SchedulerError::Dependency(format!("invalid job id in: {term}")))?;
                let target = JobId::new(target);
                Self::reject_self_reference(target, owner, term)?;
                Ok(DependencySpec::after(kind, target))
            }
            (_, None) => Err(SchedulerError::Dependency(format!(
                "dependency kind {kind_str} requires a target job id: {term}"
            ))),
        }
    }

    fn reject_self_reference(target: JobId, owner: JobId, term: &str) -> Result<(), SchedulerError> {
        if target == owner {
            Err(SchedulerError::Dependency(format!(
                "dependency cannot reference its own job: {term}"
            )))
        } else {
            Ok(())
        }
    }

    fn parse_kind(s: &str) -> Result<DependencyKind, SchedulerError> {
        match s {
            "after" => Ok(DependencyKind::After),
            "afterany" => Ok(DependencyKind::AfterAny),
            "afterok" => Ok(DependencyKind::AfterOk),
            "afternotok" => Ok(DependencyKind::AfterNotOk),
            "expand" => Ok(DependencyKind::Expand),
            "singleton" => Ok(DependencyKind::Singleton),
            other => Err(SchedulerError::Dependency(format!(
                "unrecognized dependency kind: {other}"
            ))),
        }
    }

    pub fn execute(
        &self,
        job_id: JobId,
        raw: &str,
        directory: &mut dyn JobDirectory,
    ) -> Result<(), SchedulerError> {
        if directory.get(job_id).is_none() {
            return Err(SchedulerError::InvalidJobId(job_id));
        }
        let list = Self::parse_list(raw, job_id)?;

        let mut snapshot: Vec<Job> = directory.all().into_iter().cloned().collect();
        for job in snapshot.iter_mut() {
            if job.id == job_id {
                job.dependencies = list.clone();
            }
        }
        let refs: Vec<&Job> = snapshot.iter().collect();
        let mut engine = DependencyEngine::new();
        engine.build_graph(&refs);
        if engine.has_circular_dependencies() {
            return Err(SchedulerError::CircularDependency(job_id));
        }

        let job = directory
            .get_mut(job_id)
            .ok_or(SchedulerError::InvalidJobId(job_id))?;
        job.dependencies = list;
        Ok(())
    }
}

impl Default for UpdateJobDependency {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryJobDirectory;

    fn owner() -> JobId {
        JobId::new(1)
    }

    #[test]
    fn parses_mixed_kinds_and_singleton() {
        let list = UpdateJobDependency::parse_list("afterok:3,after:4,singleton", owner()).unwrap();
        assert_eq!(list.specs.len(), 3);
        assert_eq!(list.specs[0].kind, DependencyKind::AfterOk);
        assert_eq!(list.specs[2].kind, DependencyKind::Singleton);
    }

    #[test]
    fn empty_string_clears_dependencies() {
        let list = UpdateJobDependency::parse_list("", owner()).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn a_single_zero_clears_dependencies() {
        let list = UpdateJobDependency::parse_list("0", owner()).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(UpdateJobDependency::parse_list("maybe:3", owner()).is_err());
    }

    #[test]
    fn rejects_missing_target_for_non_singleton_kind() {
        assert!(UpdateJobDependency::parse_list("afterok", owner()).is_err());
    }

    #[test]
    fn bare_decimal_id_rewrites_as_afterany() {
        let list = UpdateJobDependency::parse_list("42", owner()).unwrap();
        assert_eq!(list.specs.len(), 1);
        assert_eq!(list.specs[0].kind, DependencyKind::AfterAny);
        assert_eq!(list.specs[0].target, Some(JobId::new(42)));
    }

    #[test]
    fn rejects_a_term_referencing_its_own_job() {
        assert!(UpdateJobDependency::parse_list("afterok:1", owner()).is_err());
        assert!(UpdateJobDependency::parse_list("1", owner()).is_err());
    }

    #[test]
    fn execute_rewrites_the_jobs_dependency_list() {
        let mut dir = InMemoryJobDirectory::new();
        dir.insert(Job::new(JobId::new(1), "sim", 1, 1)).unwrap();
        UpdateJobDependency::new()
            .execute(JobId::new(1), "after:2", &mut dir)
            .unwrap();
        assert_eq!(dir.get(JobId::new(1)).unwrap().dependencies.specs.len(), 1);
    }

    #[test]
    fn execute_rejects_a_cycle_and_leaves_the_list_unchanged() {
        let mut dir = InMemoryJobDirectory::new();
        dir.insert(Job::new(JobId::new(10), "a", 1, 1)).unwrap();
        dir.insert(Job::new(JobId::new(11), "b", 1, 1)).unwrap();

        UpdateJobDependency::new()
            .execute(JobId::new(10), "afterok:11", &mut dir)
            .unwrap();

        let err = UpdateJobDependency::new()
            .execute(JobId::new(11), "afterok:10", &mut dir)
            .unwrap_err();
        assert!(matches!(err, SchedulerError::CircularDependency(id) if id == JobId::new(11)));
        assert!(dir.get(JobId::new(11)).unwrap().dependencies.is_empty());
    }
}
