//! Team entity and the closed registry of valid teams

use serde::{Deserialize, Serialize};

use crate::entities::TeamCounts;
use crate::error::DomainError;

/// Maximum length of a team id
pub const MAX_TEAM_ID_LEN: usize = 32;

/// A fixed voting option within the campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub display_name: String,
}

impl Team {
    /// Create a new Team, validating the id format
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let display_name = display_name.into();

        if !is_valid_team_id(&id) {
            return Err(DomainError::ValidationError(format!(
                "team id '{id}' must be 1-{MAX_TEAM_ID_LEN} chars of [a-z0-9_-]"
            )));
        }
        if display_name.trim().is_empty() {
            return Err(DomainError::ValidationError(format!(
                "team '{id}' needs a display name"
            )));
        }

        Ok(Self { id, display_name })
    }
}

/// Team ids are lowercase ascii alphanumerics, `-` or `_`
pub fn is_valid_team_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_TEAM_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

/// Closed, validated set of teams for the live activity.
///
/// Built once at startup and never mutated. Lookup is linear; the set is tiny.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    /// Build a registry, rejecting empty sets and duplicate ids
    pub fn new(teams: Vec<Team>) -> Result<Self, DomainError> {
        if teams.is_empty() {
            return Err(DomainError::ValidationError(
                "team registry must contain at least one team".to_string(),
            ));
        }

        for (i, team) in teams.iter().enumerate() {
            if teams[..i].iter().any(|t| t.id == team.id) {
                return Err(DomainError::ValidationError(format!(
                    "duplicate team id '{}'",
                    team.id
                )));
            }
        }

        Ok(Self { teams })
    }

    /// Parse a registry from `id:Display Name,id:Display Name`
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let teams = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (id, name) = entry.split_once(':').ok_or_else(|| {
                    DomainError::ValidationError(format!(
                        "team entry '{entry}' must look like id:Display Name"
                    ))
                })?;
                Team::new(id.trim(), name.trim())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(teams)
    }

    /// Look up a team by id
    pub fn get(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Resolve a team id, failing with `InvalidTeam` when it is not registered
    pub fn validate(&self, team_id: &str) -> Result<&Team, DomainError> {
        self.get(team_id)
            .ok_or_else(|| DomainError::InvalidTeam(team_id.to_string()))
    }

    /// Check if a team id is registered
    #[inline]
    pub fn contains(&self, team_id: &str) -> bool {
        self.get(team_id).is_some()
    }

    /// Registered teams in configuration order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Registered team ids in configuration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(|t| t.id.as_str())
    }

    /// Number of registered teams
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Always false; an empty registry cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// A tally with every registered team at zero
    pub fn zeroed_counts(&self) -> TeamCounts {
        self.ids().map(|id| (id.to_string(), 0)).collect()
    }
}
