pub mod address;
pub mod amount;
pub mod model;
pub mod raw;
pub mod state;

pub use address::Address;
pub use amount::Wei;
pub use model::{PROPOSAL_FIELDS, Proposal, STAGE_FIELDS, Stage};
pub use raw::{RawTuple, RawValue};
pub use state::{ProposalState, StageState};
