//! Role handlers

use axum::extract::State;
use community_service::dto::{CreateRoleRequest, PageMeta, RoleResponse};
use community_service::RoleService;

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// POST /v1/role
pub async fn create_role(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateRoleRequest>,
) -> ApiResult<ApiJson<RoleResponse>> {
    let role = RoleService::new(state.service_context()).create(request).await?;
    Ok(ApiJson::new(role))
}

/// GET /v1/role
pub async fn list_roles(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<Vec<RoleResponse>, PageMeta>> {
    let listed = RoleService::new(state.service_context()).list(page).await?;
    Ok(ApiJson::with_meta(listed.data, listed.meta))
}
