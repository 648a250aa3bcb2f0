//! Per-activity tally cache.

mod count_cache;

pub use count_cache::{counts_key, RedisCountCache, COUNTS_PREFIX, GENERATED_AT_FIELD};
