use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Responded,
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProposalStatus::Pending => write!(f, "pending"),
            ProposalStatus::Responded => write!(f, "responded"),
        }
    }
}

/// One entry of the couple's timeline, kept in submission order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryEvent {
    pub date: String,
    pub event: String,
}

/// A stored proposal document (collection `proposals`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<ObjectId>,
    pub id: String,
    pub partner_name: String,
    pub proposer_name: String,
    pub message: String,
    #[serde(default)]
    pub our_story: Vec<StoryEvent>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ProposalStatus,
    /// Mirror of the most recent response, absent until the first one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl Proposal {
    pub fn new(
        partner_name: String,
        proposer_name: String,
        message: String,
        our_story: Vec<StoryEvent>,
    ) -> Self {
        Self {
            mongo_id: None,
            id: uuid::Uuid::new_v4().to_string(),
            partner_name,
            proposer_name,
            message,
            our_story,
            created_at: Utc::now(),
            status: ProposalStatus::Pending,
            response: None,
        }
    }

    pub fn mark_responded(&mut self, response: &str) {
        self.status = ProposalStatus::Responded;
        self.response = Some(response.to_string());
    }
}
