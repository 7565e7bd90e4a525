//! Credential signer port
//!
//! Produces the opaque signed token attached to a launch request (spec
//! §4.7, `make_batch_job_cred`). A real deployment delegates to the
//! cluster's munge/JWT signing service; this crate ships a stub that
//! renders a deterministic, unsigned digest string, clearly not
//! cryptographically meaningful.

use crate::domain::entities::LaunchCredential;
use crate::infrastructure::error::SchedulerError;

#[cfg_attr(test, mockall::automock)]
pub trait CredentialSigner: Send + Sync {
    fn sign(&self, credential: &LaunchCredential) -> Result<String, SchedulerError>;
}

pub struct UnsignedStubSigner;

impl CredentialSigner for UnsignedStubSigner {
    fn sign(&self, credential: &LaunchCredential) -> Result<String, SchedulerError> {
        Ok(format!(
            "unsigned:{}:{}:{}",
            credential.job_id,
            credential.step_id,
            credential.hostlist.join(";")
        ))
    }
}
