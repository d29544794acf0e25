use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use service_core::error::AppError;

use crate::dtos::{
    CreateProposalRequest, CreateProposalResponse, ProposalDocument, ProposalStatusResponse,
    RespondRequest, RespondResponse,
};
use crate::models::{Proposal, ProposalResponse};
use crate::services::{record_proposal_created, record_response};
use crate::startup::AppState;

fn proposal_not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Proposal not found"))
}

#[tracing::instrument(skip(state, request))]
pub async fn create_proposal(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateProposalRequest>, AppError>,
) -> Result<Json<CreateProposalResponse>, AppError> {
    let proposal = Proposal::new(
        request.partner_name,
        request.proposer_name,
        request.message,
        request.our_story,
    );

    state
        .store
        .insert_proposal(&proposal)
        .await
        .map_err(|e| e.context("Error creating proposal"))?;

    record_proposal_created();
    tracing::info!(
        proposal_id = %proposal.id,
        story_events = proposal.our_story.len(),
        "Proposal created"
    );

    Ok(Json(CreateProposalResponse {
        success: true,
        proposal_id: proposal.id,
        message: "Proposal created successfully!".to_string(),
    }))
}

#[tracing::instrument(skip(state))]
pub async fn get_proposal(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
) -> Result<Json<ProposalDocument>, AppError> {
    let proposal = state
        .store
        .find_proposal(&proposal_id)
        .await
        .map_err(|e| e.context("Error fetching proposal"))?
        .ok_or_else(proposal_not_found)?;

    Ok(Json(ProposalDocument::from(proposal)))
}

#[tracing::instrument(skip(state, request))]
pub async fn respond_to_proposal(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<RespondRequest>, AppError>,
) -> Result<Json<RespondResponse>, AppError> {
    state
        .store
        .find_proposal(&proposal_id)
        .await
        .map_err(|e| e.context("Error recording response"))?
        .ok_or_else(proposal_not_found)?;

    if request.proposal_id != proposal_id {
        tracing::warn!(
            proposal_id = %proposal_id,
            body_proposal_id = %request.proposal_id,
            "Body proposal_id differs from path; using path"
        );
    }

    let response = ProposalResponse::new(&proposal_id, &request.response, request.message);

    // Two independent writes; a failure between them leaves the proposal pending.
    state
        .store
        .insert_response(&response)
        .await
        .map_err(|e| e.context("Error recording response"))?;
    state
        .store
        .mark_responded(&proposal_id, &response.response)
        .await
        .map_err(|e| e.context("Error recording response"))?;

    record_response(&response.response);
    tracing::info!(
        proposal_id = %proposal_id,
        response_id = %response.id,
        response = %response.response,
        "Response recorded"
    );

    Ok(Json(RespondResponse {
        success: true,
        message: format!("Response '{}' recorded successfully!", request.response),
        response_id: response.id,
    }))
}

#[tracing::instrument(skip(state))]
pub async fn get_proposal_status(
    State(state): State<AppState>,
    Path(proposal_id): Path<String>,
) -> Result<Json<ProposalStatusResponse>, AppError> {
    let proposal = state
        .store
        .find_proposal(&proposal_id)
        .await
        .map_err(|e| e.context("Error fetching status"))?
        .ok_or_else(proposal_not_found)?;

    let latest = state
        .store
        .latest_response(&proposal_id)
        .await
        .map_err(|e| e.context("Error fetching status"))?;

    Ok(Json(ProposalStatusResponse::new(proposal, latest)))
}
