//! In-memory implementations of the storage ports
//!
//! Both fakes can be switched into failure modes so tests can drive the
//! degraded paths without real infrastructure.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use vote_core::{
    CachedTally, CountCache, DomainError, NewVote, RepoResult, TeamCounts, Vote, VoteRepository,
};

/// Vote store backed by a map keyed on `(user_id, activity_id)`.
///
/// The uniqueness check and the insert happen under one lock.
#[derive(Debug, Default)]
pub struct InMemoryVoteRepository {
    votes: Mutex<HashMap<(String, String), Vote>>,
    offline: AtomicBool,
    fail_counts: AtomicBool,
    count_calls: AtomicUsize,
    team_count_calls: AtomicUsize,
}

impl InMemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails with a database error
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Only the count queries fail
    pub fn set_fail_counts(&self, fail: bool) {
        self.fail_counts.store(fail, Ordering::SeqCst);
    }

    /// How many times the store was asked to aggregate
    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    /// How many single-team counts were served
    pub fn team_count_calls(&self) -> usize {
        self.team_count_calls.load(Ordering::SeqCst)
    }

    fn check_counts(&self) -> RepoResult<()> {
        self.check_online()?;
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("aggregate failed".to_string()));
        }
        Ok(())
    }

    /// Number of stored votes across all activities
    pub fn len(&self) -> usize {
        self.votes.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> RepoResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(DomainError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn lock(&self) -> RepoResult<std::sync::MutexGuard<'_, HashMap<(String, String), Vote>>> {
        self.votes
            .lock()
            .map_err(|_| DomainError::InternalError("vote map poisoned".to_string()))
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn record_vote(&self, vote: &NewVote) -> RepoResult<Vote> {
        self.check_online()?;
        let mut votes = self.lock()?;
        let key = (vote.user_id.clone(), vote.activity_id.clone());
        if votes.contains_key(&key) {
            return Err(DomainError::AlreadyVoted);
        }
        let stored = vote.clone().into_vote();
        votes.insert(key, stored.clone());
        Ok(stored)
    }

    async fn find_vote(&self, user_id: &str, activity_id: &str) -> RepoResult<Option<Vote>> {
        self.check_online()?;
        let votes = self.lock()?;
        Ok(votes
            .get(&(user_id.to_string(), activity_id.to_string()))
            .cloned())
    }

    async fn count_by_team(&self, activity_id: &str) -> RepoResult<TeamCounts> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check_counts()?;

        let votes = self.lock()?;
        let mut counts = TeamCounts::new();
        for vote in votes.values().filter(|v| v.activity_id == activity_id) {
            *counts.entry(vote.team_id.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn count_for_team(&self, activity_id: &str, team_id: &str) -> RepoResult<i64> {
        self.team_count_calls.fetch_add(1, Ordering::SeqCst);
        self.check_counts()?;

        let votes = self.lock()?;
        let count = votes
            .values()
            .filter(|v| v.activity_id == activity_id && v.team_id == team_id)
            .count();
        Ok(count as i64)
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check_online()
    }
}

/// Count cache with real expiry, plus offline and slow modes
#[derive(Debug, Default)]
pub struct InMemoryCountCache {
    entries: Mutex<HashMap<String, (CachedTally, Instant)>>,
    offline: AtomicBool,
    slow: Mutex<Option<Duration>>,
    puts: AtomicUsize,
    last_ttl: Mutex<Option<Duration>>,
}

impl InMemoryCountCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails with a cache error
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Every operation sleeps this long before answering
    pub fn set_delay(&self, delay: Option<Duration>) {
        if let Ok(mut slow) = self.slow.lock() {
            *slow = delay;
        }
    }

    /// Number of successful writes
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// TTL passed to the most recent write
    pub fn last_ttl(&self) -> Option<Duration> {
        self.last_ttl.lock().ok().and_then(|t| *t)
    }

    /// Peek at a live entry without going through the port
    pub fn peek(&self, activity_id: &str) -> Option<CachedTally> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(activity_id)
            .filter(|(_, expires)| *expires > Instant::now())
            .map(|(tally, _)| tally.clone())
    }

    /// Seed an entry directly
    pub fn seed(&self, activity_id: &str, tally: CachedTally, ttl: Duration) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(activity_id.to_string(), (tally, Instant::now() + ttl));
        }
    }

    async fn enter(&self) -> RepoResult<()> {
        let delay = self.slow.lock().ok().and_then(|d| *d);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            Err(DomainError::CacheError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn lock(&self) -> RepoResult<std::sync::MutexGuard<'_, HashMap<String, (CachedTally, Instant)>>> {
        self.entries
            .lock()
            .map_err(|_| DomainError::InternalError("cache map poisoned".to_string()))
    }
}

#[async_trait]
impl CountCache for InMemoryCountCache {
    async fn get_tally(&self, activity_id: &str) -> RepoResult<Option<CachedTally>> {
        self.enter().await?;
        let mut entries = self.lock()?;
        match entries.get(activity_id) {
            Some((tally, expires)) if *expires > Instant::now() => Ok(Some(tally.clone())),
            Some(_) => {
                entries.remove(activity_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put_tally(
        &self,
        activity_id: &str,
        tally: &CachedTally,
        ttl: Duration,
    ) -> RepoResult<()> {
        self.enter().await?;
        self.lock()?
            .insert(activity_id.to_string(), (tally.clone(), Instant::now() + ttl));
        if let Ok(mut last) = self.last_ttl.lock() {
            *last = Some(ttl);
        }
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn invalidate(&self, activity_id: &str) -> RepoResult<()> {
        self.enter().await?;
        self.lock()?.remove(activity_id);
        Ok(())
    }

    async fn ping(&self) -> RepoResult<()> {
        self.enter().await
    }
}
