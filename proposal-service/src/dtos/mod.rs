pub mod proposals;

pub use proposals::{
    CreateProposalRequest, CreateProposalResponse, ProposalDocument, ProposalStatusResponse,
    RespondRequest, RespondResponse,
};
