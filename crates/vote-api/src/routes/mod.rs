//! Route definitions
//!
//! Activity routes are mounted at the root. Health routes are kept apart so
//! they can bypass rate limiting.

use axum::{routing::get, Router};

use crate::handlers::{activities, counts, health, votes};
use crate::state::AppState;

/// Create the API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/activities/:activity_id", get(activities::get_activity))
        .route(
            "/activities/:activity_id/vote",
            get(votes::get_my_vote).post(votes::submit_vote),
        )
        .route("/activities/:activity_id/counts", get(counts::get_counts))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
