//! Tally types - derived, regenerable projections of the vote rows

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-team vote counts. Keys stay sorted so serialization is stable.
pub type TeamCounts = BTreeMap<String, i64>;

/// Where a snapshot was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountSource {
    Cache,
    Store,
}

impl std::fmt::Display for CountSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Store => write!(f, "store"),
        }
    }
}

/// What the count cache holds for one activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedTally {
    pub counts: TeamCounts,
    pub generated_at: DateTime<Utc>,
}

impl CachedTally {
    pub fn new(counts: TeamCounts, generated_at: DateTime<Utc>) -> Self {
        Self {
            counts,
            generated_at,
        }
    }
}

/// Point-in-time view of an activity's tally
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountSnapshot {
    pub activity_id: String,
    pub counts: TeamCounts,
    pub generated_at: DateTime<Utc>,
    pub source: CountSource,
}

impl CountSnapshot {
    /// Total votes across all teams
    pub fn total(&self) -> i64 {
        self.counts.values().sum()
    }

    /// Votes for one team (zero when absent)
    pub fn count_for(&self, team_id: &str) -> i64 {
        self.counts.get(team_id).copied().unwrap_or(0)
    }

    /// Whether the snapshot was served from the cache
    #[inline]
    pub fn is_cached(&self) -> bool {
        self.source == CountSource::Cache
    }
}

/// Overlay `counts` onto `base`, keeping only keys already present in `base`.
///
/// Returns the ids that were dropped.
pub fn overlay_counts(base: &mut TeamCounts, counts: &TeamCounts) -> Vec<String> {
    let mut dropped = Vec::new();
    for (team_id, count) in counts {
        match base.get_mut(team_id) {
            Some(slot) => *slot = *count,
            None => dropped.push(team_id.clone()),
        }
    }
    dropped
}
