//! Database models - SQLx-compatible structs for PostgreSQL tables

mod vote;

pub use vote::{TeamCountModel, VoteModel};
