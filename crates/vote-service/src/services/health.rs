//! Health service
//!
//! Dependency checks for the readiness probe.

use crate::dto::ReadinessResponse;

use super::bounded::bounded;
use super::context::ServiceContext;

/// Health service
pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    /// Create a new HealthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ping the store and the cache concurrently
    pub async fn readiness(&self) -> ReadinessResponse {
        let timeouts = self.ctx.timeouts();
        let (store, cache) = tokio::join!(
            bounded(timeouts.store, "vote store", self.ctx.vote_repo().ping()),
            bounded(timeouts.cache, "count cache", self.ctx.count_cache().ping()),
        );

        ReadinessResponse::ready(store.is_ok(), cache.is_ok())
    }
}
