pub mod proposal;
pub mod response;

pub use proposal::{Proposal, ProposalStatus, StoryEvent};
pub use response::ProposalResponse;
