//! Vote handlers
//!
//! Endpoints for casting a vote and reading back the caller's own vote.

use axum::{extract::State, Json};
use vote_core::DomainError;
use vote_service::{ApiResponse, MyVoteResponse, SubmitVoteRequest, VoteReceiptResponse, VoteService};

use crate::extractors::{ActivityIdPath, AuthUser, PathParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Cast a vote
///
/// POST /activities/{activity_id}/vote
pub async fn submit_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<ActivityIdPath>,
    ValidatedJson(body): ValidatedJson<SubmitVoteRequest>,
) -> ApiResult<Created<Json<ApiResponse<VoteReceiptResponse>>>> {
    let service = VoteService::new(state.service_context());
    let receipt = service
        .submit_vote(&auth.user_id, &path.activity_id, &body.team_id)
        .await?;
    Ok(Created(Json(ApiResponse::new(receipt.into()))))
}

/// Get the caller's vote
///
/// GET /activities/{activity_id}/vote
pub async fn get_my_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<ActivityIdPath>,
) -> ApiResult<Json<ApiResponse<MyVoteResponse>>> {
    let service = VoteService::new(state.service_context());
    let vote = service
        .get_my_vote(&auth.user_id, &path.activity_id)
        .await?
        .ok_or(DomainError::VoteNotFound)?;
    Ok(Json(ApiResponse::new(vote.into())))
}
