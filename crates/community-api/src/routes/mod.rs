//! Route definitions
//!
//! API routes are mounted under `/v1`; health probes sit at the root.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{self, auth, communities, health, members, roles};
use crate::state::AppState;

/// API router without health routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/v1", api_v1_routes())
        .fallback(handlers::not_found)
}

/// Health check routes, kept outside the rate limiter
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(community_routes())
        .merge(member_routes())
        .merge(role_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/signin", post(auth::signin))
        .route("/auth/me", get(auth::me))
}

fn community_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/community",
            post(communities::create_community).get(communities::list_communities),
        )
        .route("/community/me/owner", get(communities::list_owned_communities))
        .route("/community/me/member", get(communities::list_joined_communities))
        .route("/community/:id", patch(communities::rename_community))
        .route("/community/:id/members", get(communities::list_community_members))
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/member", post(members::add_member))
        .route("/member/:id", delete(members::remove_member))
}

fn role_routes() -> Router<AppState> {
    Router::new().route("/role", post(roles::create_role).get(roles::list_roles))
}
