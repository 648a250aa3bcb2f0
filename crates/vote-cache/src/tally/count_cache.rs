//! Redis-backed count cache.
//!
//! Each activity's tally is one hash under `vote_counts:{activity_id}`: one
//! field per team plus a reserved `@generated_at` field holding the unix
//! milliseconds at which the tally was aggregated. Team ids cannot contain
//! `@`, so the reserved field never collides with a team.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use vote_core::{CachedTally, CountCache, RepoResult, TeamCounts};

use crate::pool::RedisPool;

/// Key prefix for cached tallies
pub const COUNTS_PREFIX: &str = "vote_counts:";
/// Reserved hash field carrying the aggregation time
pub const GENERATED_AT_FIELD: &str = "@generated_at";

/// Cache key for an activity's tally
#[must_use]
pub fn counts_key(activity_id: &str) -> String {
    format!("{COUNTS_PREFIX}{activity_id}")
}

fn encode_tally(tally: &CachedTally) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = tally
        .counts
        .iter()
        .map(|(team_id, count)| (team_id.clone(), count.to_string()))
        .collect();
    fields.push((
        GENERATED_AT_FIELD.to_string(),
        tally.generated_at.timestamp_millis().to_string(),
    ));
    fields
}

/// Decode a stored hash. Anything partial or malformed reads as a miss.
fn decode_tally(mut fields: HashMap<String, String>) -> Option<CachedTally> {
    let generated_at = fields
        .remove(GENERATED_AT_FIELD)?
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)?;

    if fields.is_empty() {
        return None;
    }

    let mut counts = TeamCounts::new();
    for (team_id, raw) in fields {
        let count = raw.parse::<i64>().ok().filter(|c| *c >= 0)?;
        counts.insert(team_id, count);
    }

    Some(CachedTally::new(counts, generated_at))
}

/// Count cache stored in Redis hashes
#[derive(Debug, Clone)]
pub struct RedisCountCache {
    pool: RedisPool,
}

impl RedisCountCache {
    /// Create a new count cache
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountCache for RedisCountCache {
    #[instrument(skip(self))]
    async fn get_tally(&self, activity_id: &str) -> RepoResult<Option<CachedTally>> {
        let fields = self.pool.hash_get_all(&counts_key(activity_id)).await?;
        if fields.is_empty() {
            return Ok(None);
        }

        let tally = decode_tally(fields);
        if tally.is_none() {
            debug!("Ignoring malformed cached tally");
        }
        Ok(tally)
    }

    #[instrument(skip(self, tally), fields(teams = tally.counts.len()))]
    async fn put_tally(
        &self,
        activity_id: &str,
        tally: &CachedTally,
        ttl: Duration,
    ) -> RepoResult<()> {
        self.pool
            .replace_hash(&counts_key(activity_id), &encode_tally(tally), ttl)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate(&self, activity_id: &str) -> RepoResult<()> {
        self.pool.delete(&counts_key(activity_id)).await?;
        Ok(())
    }

    async fn ping(&self) -> RepoResult<()> {
        self.pool.health_check().await?;
        Ok(())
    }
}
