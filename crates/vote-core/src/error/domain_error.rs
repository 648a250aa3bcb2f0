//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown team: {0}")]
    InvalidTeam(String),

    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    #[error("Invalid user id")]
    InvalidUserId,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Voting is closed for this activity")]
    VotingClosed,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("User has already voted in this activity")]
    AlreadyVoted,

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("No vote recorded for this user")]
    VoteNotFound,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidTeam(_) => "INVALID_TEAM",
            Self::UnknownActivity(_) => "UNKNOWN_ACTIVITY",
            Self::InvalidUserId => "INVALID_USER_ID",

            // Business Rules
            Self::VotingClosed => "VOTING_CLOSED",

            // Conflict
            Self::AlreadyVoted => "ALREADY_VOTED",

            // Not Found
            Self::VoteNotFound => "VOTE_NOT_FOUND",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidTeam(_)
                | Self::UnknownActivity(_)
                | Self::InvalidUserId
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyVoted)
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::VoteNotFound)
    }

    /// Check if this is a business-rule rejection (forbidden)
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::VotingClosed)
    }

    /// Check if this error means a dependency (store, cache) was unreachable or slow
    pub fn is_dependency(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::CacheError(_) | Self::Timeout(_)
        )
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        if self.is_validation() {
            400
        } else if self.is_forbidden() {
            403
        } else if self.is_not_found() {
            404
        } else if self.is_conflict() {
            409
        } else if self.is_dependency() {
            503
        } else {
            500
        }
    }
}
