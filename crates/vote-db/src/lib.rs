//! # vote-db
//!
//! Database layer implementing the vote store with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! The `votes` table is the single source of truth for every tally. It handles:
//!
//! - Connection pool management (kept small; the managed instance has a hard ceiling)
//! - Idempotent schema setup
//! - Database models with SQLx `FromRow` derives
//! - The `VoteRepository` implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vote_db::{create_pool, ensure_schema, DatabaseConfig, PgVoteRepository};
//! use vote_core::VoteRepository;
//!
//! async fn example(config: &vote_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from(config)).await?;
//!     ensure_schema(&pool).await?;
//!     let votes = PgVoteRepository::new(pool);
//!
//!     let counts = votes.count_by_team("act1").await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::PgVoteRepository;
pub use schema::ensure_schema;
