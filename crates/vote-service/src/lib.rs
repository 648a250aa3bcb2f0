//! # vote-service
//!
//! Application layer containing vote submission, count aggregation, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    ActivityResponse, ApiResponse, CountsResponse, HealthChecks, HealthResponse, MyVoteResponse,
    ReadinessResponse, SubmitVoteRequest, TeamResponse, VoteReceiptResponse, VoteResponse,
};
pub use services::{
    CampaignService, CountCacheSettings, CountService, HealthService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ServiceTimeouts, VoteService,
};
