//! # vote-cache
//!
//! Redis caching layer for per-activity vote tallies.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool, bounded waits
//! - **Count Cache**: Cache-aside tallies stored as a hash per activity with a TTL
//!
//! ## Example
//!
//! ```ignore
//! use vote_cache::{RedisCountCache, RedisPool, RedisPoolConfig};
//! use vote_core::CountCache;
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let cache = RedisCountCache::new(pool);
//!
//! if let Some(tally) = cache.get_tally("act1").await? {
//!     println!("{:?}", tally.counts);
//! }
//! ```

pub mod pool;
pub mod tally;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export tally types
pub use tally::{counts_key, RedisCountCache, COUNTS_PREFIX, GENERATED_AT_FIELD};
