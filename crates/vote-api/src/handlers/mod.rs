//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod activities;
pub mod counts;
pub mod health;
pub mod votes;
