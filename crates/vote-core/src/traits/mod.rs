//! Ports implemented by the infrastructure crates

mod cache;
mod repositories;

pub use cache::CountCache;
pub use repositories::{RepoResult, VoteRepository};
