//! Count service
//!
//! Serves per-team tallies through a cache-aside read path. The vote store is
//! the source of truth; the cache only absorbs repeated reads and may serve a
//! tally up to one TTL old. Writes never touch the cache.

use chrono::Utc;
use tracing::{debug, instrument, warn, Instrument};
use vote_core::{overlay_counts, CachedTally, CountSnapshot, CountSource, TeamCounts};

use super::bounded::bounded;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Count service
pub struct CountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CountService<'a> {
    /// Create a new CountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current tally for an activity, preferring the cache.
    ///
    /// Cache errors and slow cache reads fall through to the store; only a
    /// store failure reaches the caller.
    #[instrument(skip(self))]
    pub async fn get_counts(&self, activity_ref: &str) -> ServiceResult<CountSnapshot> {
        let activity_id = self.ctx.activity().resolve(activity_ref)?;
        let timeouts = self.ctx.timeouts();

        match bounded(
            timeouts.cache,
            "count cache",
            self.ctx.count_cache().get_tally(activity_id),
        )
        .await
        {
            Ok(Some(tally)) => {
                debug!("Count cache hit");
                let mut counts = self.ctx.teams().zeroed_counts();
                let dropped = overlay_counts(&mut counts, &tally.counts);
                if !dropped.is_empty() {
                    debug!(?dropped, "Cached tally names unknown teams");
                }
                return Ok(CountSnapshot {
                    activity_id: activity_id.to_string(),
                    counts,
                    generated_at: tally.generated_at,
                    source: CountSource::Cache,
                });
            }
            Ok(None) => debug!("Count cache miss"),
            Err(e) => warn!(error = %e, "Count cache read failed; reading from store"),
        }

        let counts = self.aggregate_resolved(activity_id).await?;
        let tally = CachedTally::new(counts, Utc::now());
        self.populate_cache(activity_id, tally.clone());

        Ok(CountSnapshot {
            activity_id: activity_id.to_string(),
            counts: tally.counts,
            generated_at: tally.generated_at,
            source: CountSource::Store,
        })
    }

    /// Tally straight from the store, one entry per registered team
    #[instrument(skip(self))]
    pub async fn aggregate(&self, activity_ref: &str) -> ServiceResult<TeamCounts> {
        let activity_id = self.ctx.activity().resolve(activity_ref)?;
        self.aggregate_resolved(activity_id).await
    }

    async fn aggregate_resolved(&self, activity_id: &str) -> ServiceResult<TeamCounts> {
        let stored = bounded(
            self.ctx.timeouts().store,
            "vote store",
            self.ctx.vote_repo().count_by_team(activity_id),
        )
        .await?;

        let mut counts = self.ctx.teams().zeroed_counts();
        let dropped = overlay_counts(&mut counts, &stored);
        if !dropped.is_empty() {
            warn!(?dropped, "Store holds votes for teams outside the registry");
        }

        Ok(counts)
    }

    /// Write the tally back in the background; the response never waits on it
    fn populate_cache(&self, activity_id: &str, tally: CachedTally) {
        let cache = self.ctx.count_cache_handle();
        let ttl = self.ctx.cache_settings().jittered_ttl();
        let limit = self.ctx.timeouts().cache;
        let activity_id = activity_id.to_string();

        tokio::spawn(
            async move {
                match bounded(limit, "count cache", cache.put_tally(&activity_id, &tally, ttl)).await {
                    Ok(()) => debug!(ttl_ms = ttl.as_millis() as u64, "Count cache populated"),
                    Err(e) => warn!(error = %e, "Count cache write failed"),
                }
            }
            .in_current_span(),
        );
    }
}
