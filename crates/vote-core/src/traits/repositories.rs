//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{NewVote, TeamCounts, Vote};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Vote Repository
// ============================================================================

/// Durable vote store; the source of truth for every tally.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Record a vote.
    ///
    /// The uniqueness check and the insert must be one atomic storage operation.
    /// A second vote for the same `(user_id, activity_id)` fails with
    /// `DomainError::AlreadyVoted`.
    async fn record_vote(&self, vote: &NewVote) -> RepoResult<Vote>;

    /// Find the vote a user cast in an activity
    async fn find_vote(&self, user_id: &str, activity_id: &str) -> RepoResult<Option<Vote>>;

    /// Count committed votes per team. Teams without votes are absent.
    async fn count_by_team(&self, activity_id: &str) -> RepoResult<TeamCounts>;

    /// Count committed votes for a single team
    async fn count_for_team(&self, activity_id: &str, team_id: &str) -> RepoResult<i64>;

    /// Check that the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}
