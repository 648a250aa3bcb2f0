//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use vote_cache::{RedisCountCache, RedisPool};
use vote_common::{AppConfig, AppError, JwtService};
use vote_db::{create_pool, ensure_schema, DatabaseConfig, PgVoteRepository};
use vote_service::{CountCacheSettings, ServiceContext, ServiceTimeouts};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns a configuration error if the rate limiter cannot be built
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let router = apply_middleware(
        api.merge(health_routes()),
        &config.cors,
        config.app.env.is_production(),
        config.api.request_timeout(),
    );

    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Config(format!("Failed to connect to PostgreSQL: {e}")))?;
    info!("PostgreSQL connection established");

    if config.database.run_schema {
        ensure_schema(&pool)
            .await
            .map_err(|e| AppError::Config(format!("Failed to prepare schema: {e}")))?;
    }

    // Redis is optional at runtime; the pool connects lazily
    let redis_pool = RedisPool::from_config(&config.redis)
        .map_err(|e| AppError::Config(e.to_string()))?;

    let teams = config
        .campaign
        .registry()
        .map_err(|e| AppError::Config(e.to_string()))?;
    let activity = config.campaign.activity();
    info!(
        activity_id = %activity.id,
        teams = teams.len(),
        open = activity.is_open(),
        "Campaign loaded"
    );

    let service_context = ServiceContext::builder()
        .vote_repo(Arc::new(PgVoteRepository::new(pool)))
        .count_cache(Arc::new(RedisCountCache::new(redis_pool)))
        .teams(teams)
        .activity(activity)
        .timeouts(ServiceTimeouts::from(&config.counts))
        .cache_settings(CountCacheSettings::from(&config.counts))
        .jwt_service(Arc::new(JwtService::from_config(&config.jwt)))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    // Peer addresses feed the rate limiter's key extractor
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state)?;

    // Run server
    run_server(app, &addr).await
}
