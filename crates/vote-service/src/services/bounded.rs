use std::future::Future;
use std::time::Duration;

use vote_core::{DomainError, RepoResult};

/// Run a dependency call with an upper bound on how long it may take.
pub(crate) async fn bounded<T, F>(limit: Duration, dependency: &'static str, call: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::Timeout(dependency)),
    }
}
