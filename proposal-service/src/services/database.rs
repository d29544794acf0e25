use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{FindOneOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

use crate::models::{Proposal, ProposalResponse, ProposalStatus};
use crate::services::store::ProposalStore;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for proposal-service");

        let proposal_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name("proposal_id_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.proposals()
            .create_index(proposal_id_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create proposal id index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        let response_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name("response_id_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        // Serves both the per-proposal lookup and the newest-first sort.
        let response_lookup_index = IndexModel::builder()
            .keys(doc! { "proposal_id": 1, "responded_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("proposal_responded_at_idx".to_string())
                    .build(),
            )
            .build();

        self.responses()
            .create_indexes([response_id_index, response_lookup_index], None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create response indexes: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        tracing::info!("MongoDB indexes created");
        Ok(())
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn proposals(&self) -> Collection<Proposal> {
        self.db.collection("proposals")
    }

    pub fn responses(&self) -> Collection<ProposalResponse> {
        self.db.collection("responses")
    }
}

#[async_trait]
impl ProposalStore for MongoDb {
    async fn insert_proposal(&self, proposal: &Proposal) -> Result<(), AppError> {
        self.proposals()
            .insert_one(proposal, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert proposal: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    async fn find_proposal(&self, id: &str) -> Result<Option<Proposal>, AppError> {
        self.proposals()
            .find_one(doc! { "id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find proposal: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }

    async fn insert_response(&self, response: &ProposalResponse) -> Result<(), AppError> {
        self.responses()
            .insert_one(response, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert response: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    async fn mark_responded(&self, proposal_id: &str, response: &str) -> Result<(), AppError> {
        let update = doc! {
            "$set": {
                "status": ProposalStatus::Responded.to_string(),
                "response": response,
            }
        };

        self.proposals()
            .update_one(doc! { "id": proposal_id }, update, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update proposal status: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        Ok(())
    }

    async fn latest_response(
        &self,
        proposal_id: &str,
    ) -> Result<Option<ProposalResponse>, AppError> {
        let options = FindOneOptions::builder()
            .sort(doc! { "responded_at": -1 })
            .build();

        self.responses()
            .find_one(doc! { "proposal_id": proposal_id }, options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find response: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }
}
