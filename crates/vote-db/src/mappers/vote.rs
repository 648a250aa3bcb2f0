//! Vote entity <-> model mapper

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vote_core::{NewVote, TeamCounts, Vote};

use crate::models::{TeamCountModel, VoteModel};

/// Convert VoteModel to Vote entity
impl From<VoteModel> for Vote {
    fn from(model: VoteModel) -> Self {
        Vote {
            id: model.id,
            user_id: model.user_id,
            team_id: model.team_id,
            activity_id: model.activity_id,
            created_at: model.created_at,
        }
    }
}

/// Values bound into the insert statement
pub struct VoteInsert<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub team_id: &'a str,
    pub activity_id: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> VoteInsert<'a> {
    pub fn new(vote: &'a NewVote) -> Self {
        Self {
            id: vote.id,
            user_id: &vote.user_id,
            team_id: &vote.team_id,
            activity_id: &vote.activity_id,
            created_at: vote.created_at,
        }
    }
}

/// Fold grouped count rows into a tally map
pub fn counts_from_rows(rows: Vec<TeamCountModel>) -> TeamCounts {
    rows.into_iter().map(|row| (row.team_id, row.count)).collect()
}
