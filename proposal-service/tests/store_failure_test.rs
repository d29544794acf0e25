mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{sample_proposal, TestRouter};
use proposal_service::models::{Proposal, ProposalResponse};
use proposal_service::services::ProposalStore;
use serde_json::json;
use service_core::error::AppError;
use std::sync::Arc;

/// Store whose every call fails, as an unreachable database would.
struct FailingStore;

fn connection_refused() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("connection refused"))
}

#[async_trait]
impl ProposalStore for FailingStore {
    async fn insert_proposal(&self, _proposal: &Proposal) -> Result<(), AppError> {
        Err(connection_refused())
    }

    async fn find_proposal(&self, _id: &str) -> Result<Option<Proposal>, AppError> {
        Err(connection_refused())
    }

    async fn insert_response(&self, _response: &ProposalResponse) -> Result<(), AppError> {
        Err(connection_refused())
    }

    async fn mark_responded(&self, _proposal_id: &str, _response: &str) -> Result<(), AppError> {
        Err(connection_refused())
    }

    async fn latest_response(
        &self,
        _proposal_id: &str,
    ) -> Result<Option<ProposalResponse>, AppError> {
        Err(connection_refused())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(connection_refused())
    }
}

fn failing_app() -> TestRouter {
    TestRouter::over(Arc::new(FailingStore))
}

fn assert_database_error(status: StatusCode, body: &serde_json::Value, action: &str) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body: {}", body);
    assert_eq!(body["error"], "Database error");
    assert_eq!(
        body["details"],
        format!("{}: connection refused", action).as_str()
    );
}

#[tokio::test]
async fn create_reports_store_failure_as_500() {
    let app = failing_app();

    let (status, body) = app.post_json("/api/proposals", &sample_proposal()).await;

    assert_database_error(status, &body, "Error creating proposal");
}

#[tokio::test]
async fn get_reports_store_failure_as_500() {
    let app = failing_app();

    let (status, body) = app.get("/api/proposals/some-id").await;

    assert_database_error(status, &body, "Error fetching proposal");
}

#[tokio::test]
async fn respond_reports_store_failure_as_500() {
    let app = failing_app();

    let (status, body) = app
        .post_json(
            "/api/proposals/some-id/respond",
            &json!({"proposal_id": "some-id", "response": "yes"}),
        )
        .await;

    assert_database_error(status, &body, "Error recording response");
}

#[tokio::test]
async fn status_reports_store_failure_as_500() {
    let app = failing_app();

    let (status, body) = app.get("/api/proposals/some-id/status").await;

    assert_database_error(status, &body, "Error fetching status");
}

#[tokio::test]
async fn health_is_unhealthy_when_store_is_down() {
    let app = failing_app();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["error"], "Database error: connection refused");
}

#[tokio::test]
async fn readiness_fails_when_store_is_down() {
    let app = failing_app();

    let (status, _) = app.get("/ready").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
