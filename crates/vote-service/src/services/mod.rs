//! Business logic services
//!
//! This module contains the service layer that resolves the live activity,
//! validates teams, records votes, and serves tallies.

mod bounded;
pub mod campaign;
pub mod context;
pub mod counts;
pub mod error;
pub mod health;
pub mod vote;

// Re-export all services for convenience
pub use campaign::CampaignService;
pub use context::{CountCacheSettings, ServiceContext, ServiceContextBuilder, ServiceTimeouts};
pub use counts::CountService;
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use vote::VoteService;
