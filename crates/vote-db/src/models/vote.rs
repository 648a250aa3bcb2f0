//! Vote database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for votes table
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub id: Uuid,
    pub user_id: String,
    pub team_id: String,
    pub activity_id: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated vote count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct TeamCountModel {
    pub team_id: String,
    pub count: i64,
}
