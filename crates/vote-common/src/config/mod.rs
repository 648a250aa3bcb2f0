//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CampaignConfig, ConfigError, CorsConfig, CountsConfig,
    DatabaseConfig, Environment, JwtConfig, RateLimitConfig, RedisConfig, ServerConfig,
    DEFAULT_TEAMS,
};
