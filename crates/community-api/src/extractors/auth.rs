//! Authentication extractor
//!
//! Resolves the bearer token in the `Authorization` header to an existing
//! user. Every failure is reported as `NOT_SIGNEDIN`.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use community_common::AppError;
use community_core::{Snowflake, User};
use community_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    #[inline]
    pub fn id(&self) -> Snowflake {
        self.user.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::App(AppError::NotSignedIn))?;

        let app_state = AppState::from_ref(state);
        let user = AuthService::new(app_state.service_context())
            .authenticate(bearer.token())
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                ApiError::from(e)
            })?;

        Ok(AuthUser { user })
    }
}
