//! Integration test utilities for the vote service
//!
//! In-memory stand-ins for the vote store and the count cache, an in-process
//! app builder, and a live server harness for end-to-end runs.

pub mod fakes;
pub mod fixtures;

pub use fakes::*;
pub use fixtures::*;
pub use helpers::*;
