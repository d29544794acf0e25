pub mod health;
pub mod proposals;

pub use health::{health_check, metrics_endpoint, readiness_check, root};
pub use proposals::{create_proposal, get_proposal, get_proposal_status, respond_to_proposal};
