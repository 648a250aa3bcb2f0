//! Campaign service
//!
//! Read-only view of the live activity and its teams.

use chrono::Utc;

use crate::dto::ActivityResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Campaign service
pub struct CampaignService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CampaignService<'a> {
    /// Create a new CampaignService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Describe the activity behind `activity_ref`
    pub fn get_activity(&self, activity_ref: &str) -> ServiceResult<ActivityResponse> {
        let activity = self.ctx.activity();
        activity.resolve(activity_ref)?;

        Ok(ActivityResponse::from_parts(activity, self.ctx.teams(), Utc::now()))
    }
}
