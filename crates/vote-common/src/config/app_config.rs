//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use vote_core::{Activity, DomainError, Team, TeamRegistry};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub campaign: CampaignConfig,
    pub counts: CountsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    /// Upper bound for any request, enforced by middleware
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Database configuration.
///
/// The backing Postgres is usually a managed instance with a hard connection
/// ceiling shared by every replica, so the per-replica pool stays small and
/// connections are recycled quickly.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,
    /// Create the votes table on startup if it is missing
    #[serde(default = "default_run_schema")]
    pub run_schema: bool,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
    /// Bound on waiting for / creating a pooled connection
    #[serde(default = "default_redis_timeout_ms")]
    pub timeout_ms: u64,
}

/// Bearer token configuration (shared with the identity provider)
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Key clients on forwarded headers; only safe behind a proxy that rewrites them
    #[serde(default)]
    pub trust_proxy_headers: bool,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// The single live campaign and its teams
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignConfig {
    #[serde(default = "default_activity_id")]
    pub activity_id: String,
    #[serde(default = "default_activity_title")]
    pub title: String,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    pub teams: Vec<Team>,
}

impl CampaignConfig {
    /// Build the validated team registry
    pub fn registry(&self) -> Result<TeamRegistry, DomainError> {
        TeamRegistry::new(self.teams.clone())
    }

    /// Build the live activity
    #[must_use]
    pub fn activity(&self) -> Activity {
        Activity::new(&self.activity_id, &self.title).with_window(self.starts_at, self.ends_at)
    }
}

/// Count read path tuning
#[derive(Debug, Clone, Deserialize)]
pub struct CountsConfig {
    /// Base lifetime of a cached tally
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,
    /// Random spread applied either side of the base lifetime
    #[serde(default = "default_cache_ttl_jitter_ms")]
    pub cache_ttl_jitter_ms: u64,
    #[serde(default = "default_cache_timeout_ms")]
    pub cache_timeout_ms: u64,
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
    /// Whole-request budget for the counts endpoint
    #[serde(default = "default_counts_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_http_max_age")]
    pub http_max_age: u32,
    #[serde(default = "default_http_s_maxage")]
    pub http_s_maxage: u32,
    #[serde(default = "default_http_stale_while_revalidate")]
    pub http_stale_while_revalidate: u32,
}

impl CountsConfig {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    #[must_use]
    pub fn cache_ttl_jitter(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_jitter_ms)
    }

    #[must_use]
    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }

    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// `Cache-Control` value for the counts endpoint
    #[must_use]
    pub fn cache_control(&self) -> String {
        format!(
            "public, max-age={}, s-maxage={}, stale-while-revalidate={}",
            self.http_max_age, self.http_s_maxage, self.http_stale_while_revalidate
        )
    }
}

impl Default for CountsConfig {
    fn default() -> Self {
        Self {
            cache_ttl_ms: default_cache_ttl_ms(),
            cache_ttl_jitter_ms: default_cache_ttl_jitter_ms(),
            cache_timeout_ms: default_cache_timeout_ms(),
            store_timeout_ms: default_store_timeout_ms(),
            request_timeout_ms: default_counts_request_timeout_ms(),
            http_max_age: default_http_max_age(),
            http_s_maxage: default_http_s_maxage(),
            http_stale_while_revalidate: default_http_stale_while_revalidate(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "team-vote".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    0
}

fn default_acquire_timeout_ms() -> u64 {
    3_000
}

fn default_idle_timeout_secs() -> u64 {
    60
}

fn default_max_lifetime_secs() -> u64 {
    300
}

fn default_run_schema() -> bool {
    true
}

fn default_redis_max_connections() -> u32 {
    8
}

fn default_redis_timeout_ms() -> u64 {
    250
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_requests_per_second() -> u32 {
    20
}

fn default_burst() -> u32 {
    100
}

fn default_activity_id() -> String {
    "team-vote".to_string()
}

fn default_activity_title() -> String {
    "Team Vote".to_string()
}

/// Six teams, `id:Display Name` separated by commas
pub const DEFAULT_TEAMS: &str = "alpha:Team Alpha,bravo:Team Bravo,charlie:Team Charlie,\
delta:Team Delta,echo:Team Echo,foxtrot:Team Foxtrot";

fn default_cache_ttl_ms() -> u64 {
    10_000
}

fn default_cache_ttl_jitter_ms() -> u64 {
    1_000
}

fn default_cache_timeout_ms() -> u64 {
    250
}

fn default_store_timeout_ms() -> u64 {
    1_500
}

fn default_counts_request_timeout_ms() -> u64 {
    2_000
}

fn default_http_max_age() -> u32 {
    0
}

fn default_http_s_maxage() -> u32 {
    5
}

fn default_http_stale_while_revalidate() -> u32 {
    30
}

/// Read an optional variable, falling back to `default` when unset.
///
/// A set but unparsable value is an error rather than a silent default.
fn parse_var<T: FromStr>(name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default()),
    }
}

fn parse_optional_time(name: &'static str) -> Result<Option<DateTime<Utc>>, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        _ => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let teams_raw = env::var("CAMPAIGN_TEAMS").unwrap_or_else(|_| DEFAULT_TEAMS.to_string());
        let registry = TeamRegistry::parse(&teams_raw)
            .map_err(|e| ConfigError::InvalidValue("CAMPAIGN_TEAMS", e.to_string()))?;

        let campaign = CampaignConfig {
            activity_id: env::var("CAMPAIGN_ACTIVITY_ID").unwrap_or_else(|_| default_activity_id()),
            title: env::var("CAMPAIGN_TITLE").unwrap_or_else(|_| default_activity_title()),
            starts_at: parse_optional_time("CAMPAIGN_STARTS_AT")?,
            ends_at: parse_optional_time("CAMPAIGN_ENDS_AT")?,
            teams: registry.teams().to_vec(),
        };
        if campaign.activity_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "CAMPAIGN_ACTIVITY_ID",
                campaign.activity_id,
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
                request_timeout_ms: parse_var("API_REQUEST_TIMEOUT_MS", default_request_timeout_ms)?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                acquire_timeout_ms: parse_var(
                    "DATABASE_ACQUIRE_TIMEOUT_MS",
                    default_acquire_timeout_ms,
                )?,
                idle_timeout_secs: parse_var("DATABASE_IDLE_TIMEOUT_SECS", default_idle_timeout_secs)?,
                max_lifetime_secs: parse_var(
                    "DATABASE_MAX_LIFETIME_SECS",
                    default_max_lifetime_secs,
                )?,
                run_schema: parse_var("DATABASE_RUN_SCHEMA", default_run_schema)?,
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").map_err(|_| ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: parse_var("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
                timeout_ms: parse_var("REDIS_TIMEOUT_MS", default_redis_timeout_ms)?,
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?,
                issuer: env::var("JWT_ISSUER").ok().filter(|s| !s.trim().is_empty()),
                access_token_expiry: parse_var(
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    default_access_token_expiry,
                )?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: parse_var("RATE_LIMIT_BURST", default_burst)?,
                trust_proxy_headers: parse_var("RATE_LIMIT_TRUST_PROXY_HEADERS", || false)?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            campaign,
            counts: CountsConfig {
                cache_ttl_ms: parse_var("COUNTS_CACHE_TTL_MS", default_cache_ttl_ms)?,
                cache_ttl_jitter_ms: parse_var(
                    "COUNTS_CACHE_TTL_JITTER_MS",
                    default_cache_ttl_jitter_ms,
                )?,
                cache_timeout_ms: parse_var("COUNTS_CACHE_TIMEOUT_MS", default_cache_timeout_ms)?,
                store_timeout_ms: parse_var("COUNTS_STORE_TIMEOUT_MS", default_store_timeout_ms)?,
                request_timeout_ms: parse_var(
                    "COUNTS_REQUEST_TIMEOUT_MS",
                    default_counts_request_timeout_ms,
                )?,
                http_max_age: parse_var("COUNTS_HTTP_MAX_AGE", default_http_max_age)?,
                http_s_maxage: parse_var("COUNTS_HTTP_S_MAXAGE", default_http_s_maxage)?,
                http_stale_while_revalidate: parse_var(
                    "COUNTS_HTTP_STALE_WHILE_REVALIDATE",
                    default_http_stale_while_revalidate,
                )?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
