//! Activity entity - the single live voting campaign

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Sentinel identifier that always resolves to the live activity
pub const ACTIVE_SENTINEL: &str = "active";

/// The time-boxed campaign currently accepting votes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Create an activity with no voting window
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            starts_at: None,
            ends_at: None,
        }
    }

    /// Restrict voting to `[starts_at, ends_at)`
    #[must_use]
    pub fn with_window(
        mut self,
        starts_at: Option<DateTime<Utc>>,
        ends_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        self
    }

    /// Resolve a path identifier to the canonical activity id.
    ///
    /// Accepts the `active` sentinel or the canonical id itself.
    pub fn resolve<'a>(&'a self, raw: &str) -> Result<&'a str, DomainError> {
        let raw = raw.trim();
        if raw == ACTIVE_SENTINEL || raw == self.id {
            Ok(&self.id)
        } else {
            Err(DomainError::UnknownActivity(raw.to_string()))
        }
    }

    /// Whether votes are accepted at `now`
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        let started = self.starts_at.map_or(true, |start| now >= start);
        let not_ended = self.ends_at.map_or(true, |end| now < end);
        started && not_ended
    }

    /// Whether votes are accepted right now
    pub fn is_open(&self) -> bool {
        self.is_open_at(Utc::now())
    }

    /// Fail with `VotingClosed` outside the voting window
    pub fn ensure_open_at(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_open_at(now) {
            Ok(())
        } else {
            Err(DomainError::VotingClosed)
        }
    }
}
