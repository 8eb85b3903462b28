//! Community handlers

use axum::extract::State;
use community_service::dto::{
    CommunityResponse, CommunityWithOwnerResponse, CreateCommunityRequest, MemberDetailResponse,
    PageMeta, UpdateCommunityRequest,
};
use community_service::CommunityService;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// POST /v1/community
pub async fn create_community(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommunityRequest>,
) -> ApiResult<ApiJson<CommunityResponse>> {
    let community = CommunityService::new(state.service_context())
        .create(auth.id(), request)
        .await?;
    Ok(ApiJson::new(community))
}

/// PATCH /v1/community/{id}
pub async fn rename_community(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(community_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCommunityRequest>,
) -> ApiResult<ApiJson<CommunityResponse>> {
    let community = CommunityService::new(state.service_context())
        .rename(auth.id(), community_id, request)
        .await?;
    Ok(ApiJson::new(community))
}

/// GET /v1/community
pub async fn list_communities(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<Vec<CommunityWithOwnerResponse>, PageMeta>> {
    let listed = CommunityService::new(state.service_context())
        .list_all(page)
        .await?;
    Ok(ApiJson::with_meta(listed.data, listed.meta))
}

/// GET /v1/community/me/owner
pub async fn list_owned_communities(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<Vec<CommunityResponse>, PageMeta>> {
    let listed = CommunityService::new(state.service_context())
        .list_owned(auth.id(), page)
        .await?;
    Ok(ApiJson::with_meta(listed.data, listed.meta))
}

/// GET /v1/community/me/member
pub async fn list_joined_communities(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<Vec<CommunityWithOwnerResponse>, PageMeta>> {
    let listed = CommunityService::new(state.service_context())
        .list_joined(auth.id(), page)
        .await?;
    Ok(ApiJson::with_meta(listed.data, listed.meta))
}

/// GET /v1/community/{id}/members
pub async fn list_community_members(
    State(state): State<AppState>,
    IdPath(community_id): IdPath,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<Vec<MemberDetailResponse>, PageMeta>> {
    let listed = CommunityService::new(state.service_context())
        .list_members(community_id, page)
        .await?;
    Ok(ApiJson::with_meta(listed.data, listed.meta))
}
