//! Vote service
//!
//! Handles vote submission and lookup of a user's own vote.

use chrono::Utc;
use tracing::{info, instrument, warn};
use vote_core::{NewVote, Vote, VoteReceipt};

use super::bounded::bounded;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a user's vote for a team.
    ///
    /// A second submission for the same activity fails with `AlreadyVoted`,
    /// whatever team it names. The returned `total_votes` is a single-team
    /// count from the store and is `None` when that read fails; the vote
    /// itself is already committed by then.
    #[instrument(skip(self))]
    pub async fn submit_vote(
        &self,
        user_id: &str,
        activity_ref: &str,
        team_id: &str,
    ) -> ServiceResult<VoteReceipt> {
        let activity = self.ctx.activity();
        let activity_id = activity.resolve(activity_ref)?;
        activity.ensure_open_at(Utc::now())?;

        let team = self.ctx.teams().validate(team_id.trim())?;
        let new_vote = NewVote::new(user_id, &team.id, activity_id)?;

        let store_timeout = self.ctx.timeouts().store;
        let vote = bounded(
            store_timeout,
            "vote store",
            self.ctx.vote_repo().record_vote(&new_vote),
        )
        .await?;

        info!(
            vote_id = %vote.id,
            team_id = %vote.team_id,
            activity_id = %vote.activity_id,
            "Vote recorded"
        );

        let total_votes = match bounded(
            store_timeout,
            "vote store",
            self.ctx.vote_repo().count_for_team(activity_id, &team.id),
        )
        .await
        {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(error = %e, "Vote recorded but tally read failed");
                None
            }
        };

        Ok(VoteReceipt {
            vote,
            team_name: team.display_name.clone(),
            total_votes,
        })
    }

    /// Find the vote a user cast in an activity
    #[instrument(skip(self))]
    pub async fn get_my_vote(&self, user_id: &str, activity_ref: &str) -> ServiceResult<Option<Vote>> {
        let activity_id = self.ctx.activity().resolve(activity_ref)?;

        let vote = bounded(
            self.ctx.timeouts().store,
            "vote store",
            self.ctx.vote_repo().find_vote(user_id, activity_id),
        )
        .await?;

        Ok(vote)
    }
}
