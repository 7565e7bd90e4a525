//! Reservation engine port
//!
//! Tests whether a job's requested reservation (if any) currently admits
//! it (spec §4.5, `job_test_resv`).

use crate::domain::entities::Job;

#[cfg_attr(test, mockall::automock)]
pub trait ReservationEngine: Send + Sync {
    fn test_reservation(&self, job: &Job, reservation_name: &str) -> bool;
}

/// Admits any job against any named reservation; the harness has no
/// reservation records to deny against.
pub struct PermissiveReservations;

impl ReservationEngine for PermissiveReservations {
    fn test_reservation(&self, _job: &Job, _reservation_name: &str) -> bool {
        true
    }
}
