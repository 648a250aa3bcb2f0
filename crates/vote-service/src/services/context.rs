//! Service context - dependency container for services
//!
//! Holds the vote store, the count cache, the campaign definition, and the
//! tuning that bounds every dependency call. Built once at startup and passed
//! by reference; tests build it around in-memory fakes.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use vote_common::{CountsConfig, JwtService};
use vote_core::{Activity, CountCache, TeamRegistry, VoteRepository};

use super::error::{ServiceError, ServiceResult};

/// Upper bounds for dependency calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTimeouts {
    pub store: Duration,
    pub cache: Duration,
}

impl Default for ServiceTimeouts {
    fn default() -> Self {
        Self {
            store: Duration::from_millis(1_500),
            cache: Duration::from_millis(250),
        }
    }
}

impl From<&CountsConfig> for ServiceTimeouts {
    fn from(config: &CountsConfig) -> Self {
        Self {
            store: config.store_timeout(),
            cache: config.cache_timeout(),
        }
    }
}

/// Lifetime of a cached tally.
///
/// Each write picks a TTL uniformly from `ttl ± jitter` so replicas that
/// populated the same key together do not all expire together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountCacheSettings {
    pub ttl: Duration,
    pub jitter: Duration,
}

impl Default for CountCacheSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10),
            jitter: Duration::from_secs(1),
        }
    }
}

impl From<&CountsConfig> for CountCacheSettings {
    fn from(config: &CountsConfig) -> Self {
        Self {
            ttl: config.cache_ttl(),
            jitter: config.cache_ttl_jitter(),
        }
    }
}

impl CountCacheSettings {
    /// Pick a TTL with millisecond granularity; never below one millisecond
    #[must_use]
    pub fn jittered_ttl(&self) -> Duration {
        let base = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        let jitter = i64::try_from(self.jitter.as_millis()).unwrap_or(0).min(base);
        let offset = if jitter > 0 {
            rand::thread_rng().gen_range(-jitter..=jitter)
        } else {
            0
        };
        let millis = base.saturating_add(offset).max(1);
        Duration::from_millis(u64::try_from(millis).unwrap_or(1))
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Ports
    vote_repo: Arc<dyn VoteRepository>,
    count_cache: Arc<dyn CountCache>,

    // Campaign
    teams: Arc<TeamRegistry>,
    activity: Arc<Activity>,

    // Tuning
    timeouts: ServiceTimeouts,
    cache_settings: CountCacheSettings,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Ports ===

    /// Get the vote store
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    /// Get the count cache
    pub fn count_cache(&self) -> &dyn CountCache {
        self.count_cache.as_ref()
    }

    /// Owned handle on the count cache, for work that outlives the request
    pub fn count_cache_handle(&self) -> Arc<dyn CountCache> {
        Arc::clone(&self.count_cache)
    }

    // === Campaign ===

    /// Get the team registry
    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    /// Get the live activity
    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    // === Tuning ===

    pub fn timeouts(&self) -> ServiceTimeouts {
        self.timeouts
    }

    pub fn cache_settings(&self) -> CountCacheSettings {
        self.cache_settings
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("activity", &self.activity.id)
            .field("teams", &self.teams.len())
            .field("timeouts", &self.timeouts)
            .field("cache_settings", &self.cache_settings)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    vote_repo: Option<Arc<dyn VoteRepository>>,
    count_cache: Option<Arc<dyn CountCache>>,
    teams: Option<TeamRegistry>,
    activity: Option<Activity>,
    timeouts: ServiceTimeouts,
    cache_settings: CountCacheSettings,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn count_cache(mut self, cache: Arc<dyn CountCache>) -> Self {
        self.count_cache = Some(cache);
        self
    }

    pub fn teams(mut self, teams: TeamRegistry) -> Self {
        self.teams = Some(teams);
        self
    }

    pub fn activity(mut self, activity: Activity) -> Self {
        self.activity = Some(activity);
        self
    }

    pub fn timeouts(mut self, timeouts: ServiceTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn cache_settings(mut self, settings: CountCacheSettings) -> Self {
        self.cache_settings = settings;
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            vote_repo: self
                .vote_repo
                .ok_or_else(|| ServiceError::validation("vote_repo is required"))?,
            count_cache: self
                .count_cache
                .ok_or_else(|| ServiceError::validation("count_cache is required"))?,
            teams: Arc::new(
                self.teams
                    .ok_or_else(|| ServiceError::validation("teams is required"))?,
            ),
            activity: Arc::new(
                self.activity
                    .ok_or_else(|| ServiceError::validation("activity is required"))?,
            ),
            timeouts: self.timeouts,
            cache_settings: self.cache_settings,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        })
    }
}
