//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use vote_core::DomainError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Classify a failed vote insert.
///
/// A unique violation means a concurrent insert for the same user won the race.
/// A check violation means the team id could never be valid.
pub fn map_vote_write_error(e: SqlxError, team_id: &str) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::AlreadyVoted;
        }
        if db_err.is_check_violation() || db_err.is_foreign_key_violation() {
            return DomainError::InvalidTeam(team_id.to_string());
        }
    }
    map_db_error(e)
}
