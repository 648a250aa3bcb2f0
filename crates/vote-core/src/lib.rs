//! # vote-core
//!
//! Domain layer containing the team registry, the live activity, votes, tallies,
//! and the ports for the vote store and the count cache.
//! This crate has zero dependencies on infrastructure (database, cache, web framework).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    overlay_counts, Activity, CachedTally, CountSnapshot, CountSource, NewVote, Team,
    TeamCounts, TeamRegistry, Vote, VoteReceipt, ACTIVE_SENTINEL,
};
pub use error::DomainError;
pub use traits::{CountCache, RepoResult, VoteRepository};
