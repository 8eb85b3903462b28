//! Authentication handlers

use axum::extract::State;
use community_service::dto::{SigninRequest, SignupRequest, UserResponse};
use community_service::AuthService;
use serde::Serialize;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenMeta {
    pub access_token: String,
}

/// POST /v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<ApiJson<UserResponse, TokenMeta>> {
    let auth = AuthService::new(state.service_context()).signup(request).await?;
    Ok(ApiJson::with_meta(
        auth.user,
        TokenMeta {
            access_token: auth.access_token,
        },
    ))
}

/// POST /v1/auth/signin
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SigninRequest>,
) -> ApiResult<ApiJson<UserResponse, TokenMeta>> {
    let auth = AuthService::new(state.service_context()).signin(request).await?;
    Ok(ApiJson::with_meta(
        auth.user,
        TokenMeta {
            access_token: auth.access_token,
        },
    ))
}

/// GET /v1/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<ApiJson<UserResponse>> {
    let user = AuthService::new(state.service_context()).me(auth.id()).await?;
    Ok(ApiJson::new(user))
}
