use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Proposal, ProposalResponse, ProposalStatus, StoryEvent};

/// Body of `POST /api/proposals`. Every field is required; unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateProposalRequest {
    pub partner_name: String,
    pub proposer_name: String,
    pub message: String,
    pub our_story: Vec<StoryEvent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProposalResponse {
    pub success: bool,
    pub proposal_id: String,
    pub message: String,
}

/// Body of `POST /api/proposals/:id/respond`.
///
/// `proposal_id` must be present but the path parameter decides which
/// proposal is answered.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub proposal_id: String,
    pub response: String,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RespondResponse {
    pub success: bool,
    pub message: String,
    pub response_id: String,
}

/// A stored proposal as returned to clients: every field except the storage `_id`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProposalDocument {
    pub id: String,
    pub partner_name: String,
    pub proposer_name: String,
    pub message: String,
    pub our_story: Vec<StoryEvent>,
    pub created_at: DateTime<Utc>,
    pub status: ProposalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl From<Proposal> for ProposalDocument {
    fn from(p: Proposal) -> Self {
        Self {
            id: p.id,
            partner_name: p.partner_name,
            proposer_name: p.proposer_name,
            message: p.message,
            our_story: p.our_story,
            created_at: p.created_at,
            status: p.status,
            response: p.response,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProposalStatusResponse {
    pub proposal_id: String,
    pub status: ProposalStatus,
    pub response: Option<String>,
    pub response_message: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl ProposalStatusResponse {
    pub fn new(proposal: Proposal, latest: Option<ProposalResponse>) -> Self {
        let (response_message, responded_at) = match latest {
            Some(r) => (Some(r.message), Some(r.responded_at)),
            None => (None, None),
        };

        Self {
            proposal_id: proposal.id,
            status: proposal.status,
            response: proposal.response,
            response_message,
            responded_at,
        }
    }
}
