//! Member handlers

use axum::extract::State;
use community_service::dto::{AddMemberRequest, MemberResponse, RemovedMemberResponse};
use community_service::MemberService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// POST /v1/member
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddMemberRequest>,
) -> ApiResult<ApiJson<MemberResponse>> {
    let member = MemberService::new(state.service_context())
        .add_member(auth.id(), request)
        .await?;
    Ok(ApiJson::new(member))
}

/// DELETE /v1/member/{id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(member_id): IdPath,
) -> ApiResult<ApiJson<RemovedMemberResponse>> {
    let removed = MemberService::new(state.service_context())
        .remove_member(auth.id(), member_id)
        .await?;
    Ok(ApiJson::new(removed))
}
