//! Repository implementations
//!
//! PostgreSQL implementation of the vote store port defined in vote-core.

mod error;
mod vote;

pub use vote::PgVoteRepository;
