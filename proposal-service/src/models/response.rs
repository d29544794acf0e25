use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A single reply to a proposal (collection `responses`). Never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalResponse {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<ObjectId>,
    pub id: String,
    pub proposal_id: String,
    pub response: String,
    #[serde(default)]
    pub message: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub responded_at: DateTime<Utc>,
}

impl ProposalResponse {
    /// The answer is stored lowercased; any text is accepted.
    pub fn new(proposal_id: &str, response: &str, message: Option<String>) -> Self {
        Self {
            mongo_id: None,
            id: uuid::Uuid::new_v4().to_string(),
            proposal_id: proposal_id.to_string(),
            response: response.to_lowercase(),
            message: message.unwrap_or_default(),
            responded_at: Utc::now(),
        }
    }
}
