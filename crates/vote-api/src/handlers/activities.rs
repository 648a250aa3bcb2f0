//! Activity handlers

use axum::{extract::State, Json};
use vote_service::{ActivityResponse, ApiResponse, CampaignService};

use crate::extractors::{ActivityIdPath, PathParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// Describe the activity and its teams
///
/// GET /activities/{activity_id}
pub async fn get_activity(
    State(state): State<AppState>,
    PathParams(path): PathParams<ActivityIdPath>,
) -> ApiResult<Json<ApiResponse<ActivityResponse>>> {
    let service = CampaignService::new(state.service_context());
    let activity = service.get_activity(&path.activity_id)?;
    Ok(Json(ApiResponse::new(activity)))
}
