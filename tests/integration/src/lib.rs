//! End-to-end test utilities for the community API
//!
//! Starts the real router on an ephemeral port, backed by the in-memory
//! store, and talks to it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
