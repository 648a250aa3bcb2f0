//! Count handlers
//!
//! The public tally endpoint. Responses are cacheable by shared caches for a
//! few seconds and carry an ETag derived only from the counts, so a client
//! polling an unchanged tally gets an empty 304.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sha2::{Digest, Sha256};
use vote_core::TeamCounts;
use vote_service::{ApiResponse, CountService, CountsResponse, ServiceError};

use crate::extractors::{ActivityIdPath, PathParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// Current per-team tally
///
/// GET /activities/{activity_id}/counts
pub async fn get_counts(
    State(state): State<AppState>,
    PathParams(path): PathParams<ActivityIdPath>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let counts_config = &state.config().counts;
    let service = CountService::new(state.service_context());

    let snapshot = tokio::time::timeout(
        counts_config.request_timeout(),
        service.get_counts(&path.activity_id),
    )
    .await
    .map_err(|_| ServiceError::unavailable("count read timed out"))??;

    let etag = counts_etag(&snapshot.counts);
    let cache_control = counts_config.cache_control();

    if if_none_match(&headers, &etag) {
        let mut response = StatusCode::NOT_MODIFIED.into_response();
        put_cache_headers(response.headers_mut(), &cache_control, &etag);
        return Ok(response);
    }

    let mut response = Json(ApiResponse::new(CountsResponse::from(snapshot))).into_response();
    put_cache_headers(response.headers_mut(), &cache_control, &etag);
    Ok(response)
}

/// Strong ETag over `team=count` lines in key order.
///
/// Depends only on the mapping, never on timestamps or the source.
pub(crate) fn counts_etag(counts: &TeamCounts) -> String {
    let mut hasher = Sha256::new();
    for (team_id, count) in counts {
        hasher.update(format!("{team_id}={count}\n").as_bytes());
    }
    format!("\"{:x}\"", hasher.finalize())
}

/// Whether any `If-None-Match` entry matches `etag` (weak comparison)
pub(crate) fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .any(|candidate| {
            candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
        })
}

fn put_cache_headers(headers: &mut HeaderMap, cache_control: &str, etag: &str) {
    if let Ok(value) = HeaderValue::from_str(cache_control) {
        headers.insert(header::CACHE_CONTROL, value);
    }
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert(header::ETAG, value);
    }
}
