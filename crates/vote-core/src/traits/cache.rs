//! Count cache port - a transient, regenerable projection of the tally

use std::time::Duration;

use async_trait::async_trait;

use crate::entities::CachedTally;

use super::repositories::RepoResult;

/// Cache-aside store for per-activity tallies.
///
/// Entries may vanish at any time; callers fall back to the vote store.
#[async_trait]
pub trait CountCache: Send + Sync {
    /// Read the cached tally; `None` on miss
    async fn get_tally(&self, activity_id: &str) -> RepoResult<Option<CachedTally>>;

    /// Replace the cached tally, expiring after `ttl`
    async fn put_tally(&self, activity_id: &str, tally: &CachedTally, ttl: Duration)
        -> RepoResult<()>;

    /// Drop the cached tally
    async fn invalidate(&self, activity_id: &str) -> RepoResult<()>;

    /// Check that the cache backend is reachable
    async fn ping(&self) -> RepoResult<()>;
}
