//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod communities;
pub mod health;
pub mod members;
pub mod roles;

use crate::response::ApiError;

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
