use async_trait::async_trait;
use service_core::error::AppError;

use crate::models::{Proposal, ProposalResponse};

/// Persistence for proposals and their responses.
///
/// The two collections are written independently: recording a response is an
/// `insert_response` followed by `mark_responded`, with nothing tying the two
/// writes together.
#[async_trait]
pub trait ProposalStore: Send + Sync {
    async fn insert_proposal(&self, proposal: &Proposal) -> Result<(), AppError>;

    async fn find_proposal(&self, id: &str) -> Result<Option<Proposal>, AppError>;

    async fn insert_response(&self, response: &ProposalResponse) -> Result<(), AppError>;

    /// Set `status = responded` and overwrite the mirrored answer.
    async fn mark_responded(&self, proposal_id: &str, response: &str) -> Result<(), AppError>;

    /// The newest response by `responded_at`, if any.
    async fn latest_response(
        &self,
        proposal_id: &str,
    ) -> Result<Option<ProposalResponse>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
