pub mod feature_term;
pub mod job_id;
pub mod job_state;
pub mod node_bitmap;
pub mod priority;
pub mod state_reason;

pub use feature_term::{FeatureOp, FeatureTerm};
pub use job_id::JobId;
pub use job_state::JobState;
pub use node_bitmap::NodeBitmap;
pub use priority::Priority;
pub use state_reason::{StateReason, StateReasonTag};
