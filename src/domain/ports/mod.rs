pub mod agent_queue;
pub mod association;
pub mod credential_signer;
pub mod license;
pub mod node_selector;
pub mod preemption;
pub mod reservation;

pub use agent_queue::{AgentMessage, OutboundAgent};
pub use association::{AssociationValidator, PermissiveAssociations};
pub use credential_signer::{CredentialSigner, UnsignedStubSigner};
pub use license::{DenylistLicenses, LicenseEngine, UnlimitedLicenses};
pub use node_selector::{BitmapIntersectionSelector, NodeSelector};
pub use preemption::{LowestPriorityFirst, NoPreemption, PreemptionEngine};
pub use reservation::{PermissiveReservations, ReservationEngine};
