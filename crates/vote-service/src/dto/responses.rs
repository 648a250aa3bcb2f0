//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use vote_core::{CountSource, TeamCounts};

// ============================================================================
// Common Response Types
// ============================================================================

/// Success envelope: `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

// ============================================================================
// Vote Responses
// ============================================================================

/// A recorded vote
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub id: Uuid,
    pub user_id: String,
    pub team_id: String,
    pub activity_id: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful submission
#[derive(Debug, Clone, Serialize)]
pub struct VoteReceiptResponse {
    pub vote: VoteResponse,
    pub team_name: String,
    /// `null` when the tally could not be read right after the write
    pub total_votes: Option<i64>,
}

/// The caller's own vote
#[derive(Debug, Clone, Serialize)]
pub struct MyVoteResponse {
    pub vote: VoteResponse,
}

// ============================================================================
// Count Responses
// ============================================================================

/// Tally snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CountsResponse {
    pub activity_id: String,
    pub counts: TeamCounts,
    pub generated_at: DateTime<Utc>,
    pub source: CountSource,
}

// ============================================================================
// Campaign Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    pub id: String,
    pub title: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_open: bool,
    pub teams: Vec<TeamResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    /// The store is required; without the cache the service runs degraded
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let status = match (database_healthy, redis_healthy) {
            (true, true) => "ready",
            (true, false) => "degraded",
            (false, _) => "not_ready",
        };
        Self {
            status: status.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    /// Whether the instance should receive traffic
    pub fn is_ready(&self) -> bool {
        self.checks.database == "healthy"
    }
}
