//! Idempotent schema setup for the vote store

use sqlx::PgPool;
use tracing::info;

/// One row per (user, activity); the unique constraint is what makes a vote final.
const CREATE_VOTES: &str = r#"
CREATE TABLE IF NOT EXISTS votes (
    id          UUID PRIMARY KEY,
    user_id     TEXT NOT NULL,
    team_id     TEXT NOT NULL CHECK (char_length(team_id) BETWEEN 1 AND 32),
    activity_id TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT votes_user_activity_key UNIQUE (user_id, activity_id)
)
"#;

const CREATE_TALLY_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_votes_activity_team ON votes (activity_id, team_id)
"#;

/// Create the `votes` table and its tally index when missing
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in [CREATE_VOTES, CREATE_TALLY_INDEX] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Vote schema ready");
    Ok(())
}
