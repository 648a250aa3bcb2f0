//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Vote submission body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitVoteRequest {
    #[validate(length(min = 1, max = 32, message = "team_id must be 1-32 characters"))]
    pub team_id: String,
}
