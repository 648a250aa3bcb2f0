//! PostgreSQL implementation of VoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use vote_core::{DomainError, NewVote, RepoResult, TeamCounts, Vote, VoteRepository};

use crate::mappers::{counts_from_rows, VoteInsert};
use crate::models::{TeamCountModel, VoteModel};

use super::error::{map_db_error, map_vote_write_error};

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for readiness checks and tests
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self, vote), fields(user_id = %vote.user_id, team_id = %vote.team_id, activity_id = %vote.activity_id))]
    async fn record_vote(&self, vote: &NewVote) -> RepoResult<Vote> {
        let insert = VoteInsert::new(vote);

        // Conflict check and insert in one statement; no row back means the
        // user already holds a vote for this activity.
        let result = sqlx::query_as::<_, VoteModel>(
            r#"
            INSERT INTO votes (id, user_id, team_id, activity_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, activity_id) DO NOTHING
            RETURNING id, user_id, team_id, activity_id, created_at
            "#,
        )
        .bind(insert.id)
        .bind(insert.user_id)
        .bind(insert.team_id)
        .bind(insert.activity_id)
        .bind(insert.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_vote_write_error(e, insert.team_id))?;

        match result {
            Some(model) => Ok(Vote::from(model)),
            None => {
                debug!("Duplicate vote rejected");
                Err(DomainError::AlreadyVoted)
            }
        }
    }

    #[instrument(skip(self))]
    async fn find_vote(&self, user_id: &str, activity_id: &str) -> RepoResult<Option<Vote>> {
        let result = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT id, user_id, team_id, activity_id, created_at
            FROM votes
            WHERE user_id = $1 AND activity_id = $2
            "#,
        )
        .bind(user_id)
        .bind(activity_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Vote::from))
    }

    #[instrument(skip(self))]
    async fn count_by_team(&self, activity_id: &str) -> RepoResult<TeamCounts> {
        let rows = sqlx::query_as::<_, TeamCountModel>(
            r#"
            SELECT team_id, COUNT(*) AS count
            FROM votes
            WHERE activity_id = $1
            GROUP BY team_id
            "#,
        )
        .bind(activity_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(counts_from_rows(rows))
    }

    #[instrument(skip(self))]
    async fn count_for_team(&self, activity_id: &str, team_id: &str) -> RepoResult<i64> {
        // Served by idx_votes_activity_team
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM votes
            WHERE activity_id = $1 AND team_id = $2
            "#,
        )
        .bind(activity_id)
        .bind(team_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
