//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A user id nobody else in this test run will use
pub fn unique_user() -> String {
    format!("user-{}-{}", std::process::id(), unique_suffix())
}

/// An activity id nobody else in this test run will use
pub fn unique_activity() -> String {
    format!("act-{}-{}", std::process::id(), unique_suffix())
}

/// Vote submission body
#[derive(Debug, Serialize)]
pub struct SubmitVote {
    pub team_id: String,
}

impl SubmitVote {
    pub fn team(team_id: &str) -> Self {
        Self {
            team_id: team_id.to_string(),
        }
    }
}

/// Success envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Vote response
#[derive(Debug, Deserialize)]
pub struct VoteBody {
    pub id: String,
    pub user_id: String,
    pub team_id: String,
    pub activity_id: String,
    pub created_at: String,
}

/// Receipt returned by a successful submission
#[derive(Debug, Deserialize)]
pub struct ReceiptBody {
    pub vote: VoteBody,
    pub team_name: String,
    pub total_votes: Option<i64>,
}

/// The caller's own vote
#[derive(Debug, Deserialize)]
pub struct MyVoteBody {
    pub vote: VoteBody,
}

/// Tally snapshot
#[derive(Debug, Deserialize)]
pub struct CountsBody {
    pub activity_id: String,
    pub counts: BTreeMap<String, i64>,
    pub generated_at: String,
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct TeamBody {
    pub id: String,
    pub display_name: String,
}

/// Activity description
#[derive(Debug, Deserialize)]
pub struct ActivityBody {
    pub id: String,
    pub title: String,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub is_open: bool,
    pub teams: Vec<TeamBody>,
}

/// Readiness probe body
#[derive(Debug, Deserialize)]
pub struct ReadinessBody {
    pub status: String,
    pub checks: ChecksBody,
}

#[derive(Debug, Deserialize)]
pub struct ChecksBody {
    pub database: String,
    pub redis: String,
}
