//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::{DateTime, Utc};
use vote_core::{Activity, CountSnapshot, Team, TeamRegistry, Vote, VoteReceipt};

use super::responses::{
    ActivityResponse, CountsResponse, MyVoteResponse, TeamResponse, VoteReceiptResponse,
    VoteResponse,
};

impl From<&Vote> for VoteResponse {
    fn from(vote: &Vote) -> Self {
        Self {
            id: vote.id,
            user_id: vote.user_id.clone(),
            team_id: vote.team_id.clone(),
            activity_id: vote.activity_id.clone(),
            created_at: vote.created_at,
        }
    }
}

impl From<Vote> for MyVoteResponse {
    fn from(vote: Vote) -> Self {
        Self {
            vote: VoteResponse::from(&vote),
        }
    }
}

impl From<VoteReceipt> for VoteReceiptResponse {
    fn from(receipt: VoteReceipt) -> Self {
        Self {
            vote: VoteResponse::from(&receipt.vote),
            team_name: receipt.team_name,
            total_votes: receipt.total_votes,
        }
    }
}

impl From<CountSnapshot> for CountsResponse {
    fn from(snapshot: CountSnapshot) -> Self {
        Self {
            activity_id: snapshot.activity_id,
            counts: snapshot.counts,
            generated_at: snapshot.generated_at,
            source: snapshot.source,
        }
    }
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.clone(),
            display_name: team.display_name.clone(),
        }
    }
}

impl ActivityResponse {
    /// Describe an activity as of `now`
    pub fn from_parts(activity: &Activity, teams: &TeamRegistry, now: DateTime<Utc>) -> Self {
        Self {
            id: activity.id.clone(),
            title: activity.title.clone(),
            starts_at: activity.starts_at,
            ends_at: activity.ends_at,
            is_open: activity.is_open_at(now),
            teams: teams.teams().iter().map(TeamResponse::from).collect(),
        }
    }
}
