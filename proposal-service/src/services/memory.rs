use async_trait::async_trait;
use service_core::error::AppError;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{Proposal, ProposalResponse};
use crate::services::store::ProposalStore;

/// Process-local store, selected with `STORE_BACKEND=memory`.
#[derive(Default)]
pub struct InMemoryStore {
    proposals: RwLock<HashMap<String, Proposal>>,
    responses: RwLock<Vec<ProposalResponse>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn proposal_count(&self) -> usize {
        self.proposals.read().await.len()
    }

    pub async fn response_count(&self) -> usize {
        self.responses.read().await.len()
    }

    /// All responses recorded for a proposal, oldest first.
    pub async fn responses_for(&self, proposal_id: &str) -> Vec<ProposalResponse> {
        let mut responses: Vec<ProposalResponse> = self
            .responses
            .read()
            .await
            .iter()
            .filter(|r| r.proposal_id == proposal_id)
            .cloned()
            .collect();
        responses.sort_by_key(|r| r.responded_at);
        responses
    }
}

#[async_trait]
impl ProposalStore for InMemoryStore {
    async fn insert_proposal(&self, proposal: &Proposal) -> Result<(), AppError> {
        let mut proposals = self.proposals.write().await;
        if proposals.contains_key(&proposal.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate proposal id: {}",
                proposal.id
            )));
        }
        proposals.insert(proposal.id.clone(), proposal.clone());
        Ok(())
    }

    async fn find_proposal(&self, id: &str) -> Result<Option<Proposal>, AppError> {
        Ok(self.proposals.read().await.get(id).cloned())
    }

    async fn insert_response(&self, response: &ProposalResponse) -> Result<(), AppError> {
        self.responses.write().await.push(response.clone());
        Ok(())
    }

    async fn mark_responded(&self, proposal_id: &str, response: &str) -> Result<(), AppError> {
        // Matches an update against a missing document: nothing to do.
        if let Some(proposal) = self.proposals.write().await.get_mut(proposal_id) {
            proposal.mark_responded(response);
        }
        Ok(())
    }

    async fn latest_response(
        &self,
        proposal_id: &str,
    ) -> Result<Option<ProposalResponse>, AppError> {
        // max_by_key keeps the last maximum, so equal timestamps favour the later insert.
        Ok(self
            .responses
            .read()
            .await
            .iter()
            .filter(|r| r.proposal_id == proposal_id)
            .max_by_key(|r| r.responded_at)
            .cloned())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
