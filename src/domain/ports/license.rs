//! License engine port
//!
//! Tests whether the cluster currently has enough of each licensed
//! software token for the job's gres/license requests (spec §4.5,
//! `license_job_test`).

use crate::domain::entities::Job;

#[cfg_attr(test, mockall::automock)]
pub trait LicenseEngine: Send + Sync {
    fn test(&self, job: &Job) -> bool;
}

/// Grants every license request; suitable when no license inventory has
/// been configured.
pub struct UnlimitedLicenses;

impl LicenseEngine for UnlimitedLicenses {
    fn test(&self, _job: &Job) -> bool {
        true
    }
}

/// Denies a fixed set of license names, for exercising the dispatch loop's
/// `LicenseUnavailable` branch deterministically in tests.
pub struct DenylistLicenses {
    pub denied: Vec<String>,
}

impl LicenseEngine for DenylistLicenses {
    fn test(&self, job: &Job) -> bool {
        !job.resources.gres.iter().any(|g| self.denied.contains(g))
    }
}
