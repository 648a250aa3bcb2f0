//! Vote entity - a user's single choice of team within an activity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Maximum length of an opaque user id handed over by the identity provider
pub const MAX_USER_ID_LEN: usize = 128;

/// A committed vote row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: Uuid,
    pub user_id: String,
    pub team_id: String,
    pub activity_id: String,
    pub created_at: DateTime<Utc>,
}

/// A vote about to be recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    pub id: Uuid,
    pub user_id: String,
    pub team_id: String,
    pub activity_id: String,
    pub created_at: DateTime<Utc>,
}

impl NewVote {
    /// Create a new vote with a fresh id
    pub fn new(
        user_id: impl Into<String>,
        team_id: impl Into<String>,
        activity_id: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() || user_id.len() > MAX_USER_ID_LEN {
            return Err(DomainError::InvalidUserId);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            team_id: team_id.into(),
            activity_id: activity_id.into(),
            created_at: Utc::now(),
        })
    }

    /// The row as it looks once committed
    pub fn into_vote(self) -> Vote {
        Vote {
            id: self.id,
            user_id: self.user_id,
            team_id: self.team_id,
            activity_id: self.activity_id,
            created_at: self.created_at,
        }
    }
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReceipt {
    pub vote: Vote,
    pub team_name: String,
    /// Team tally right after the write; `None` when the read failed
    pub total_votes: Option<i64>,
}
