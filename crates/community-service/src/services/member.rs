//! Member service
//!
//! Adds and removes community memberships. Every mutation is preceded by the
//! matching authorization check.

use community_core::{DomainError, Member, Snowflake};
use tracing::{info, instrument};

use crate::dto::{AddMemberRequest, MemberResponse, RemovedMemberResponse};

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add `request.user` to `request.community` with `request.role`.
    ///
    /// Order: resolve community, user and role; check admin rights; check
    /// for an existing membership; insert. Two concurrent adds of the same
    /// pair can both pass the pre-check, and the loser gets the same
    /// `AlreadyMember` from the store.
    #[instrument(skip(self, request), fields(
        community_id = %request.community,
        user_id = %request.user,
        role_id = %request.role
    ))]
    pub async fn add_member(
        &self,
        actor_id: Snowflake,
        request: AddMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let community = self
            .ctx
            .community_repo()
            .find_by_id(request.community)
            .await?
            .ok_or(DomainError::CommunityNotFound(request.community))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(request.user)
            .await?
            .ok_or(DomainError::UserNotFound(request.user))?;

        let role = self
            .ctx
            .role_repo()
            .find_by_id(request.role)
            .await?
            .ok_or(DomainError::RoleNotFound(request.role))?;

        let authz = AuthorizationService::new(self.ctx);
        authz.require_admin(actor_id, community.id).await?;

        if authz.check_member_existence(user.id, community.id).await? {
            return Err(DomainError::AlreadyMember.into());
        }

        // The role name is copied as it is right now
        let member = Member::new(self.ctx.generate_id(), community.id, user.id, role.name.clone());
        self.ctx.member_repo().insert(&member).await?;

        info!(member_id = %member.id, role = %member.role, "Member added");

        Ok(MemberResponse::from_member(&member, &role))
    }

    /// Remove the membership `member_id` on behalf of `actor_id`
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        actor_id: Snowflake,
        member_id: Snowflake,
    ) -> ServiceResult<RemovedMemberResponse> {
        let target = self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or(DomainError::MemberNotFound(member_id))?;

        AuthorizationService::new(self.ctx)
            .require_remove(actor_id, &target)
            .await?;

        self.ctx.member_repo().delete(target.id).await?;

        info!(
            member_id = %target.id,
            community_id = %target.community_id,
            user_id = %target.user_id,
            "Member removed"
        );

        Ok(RemovedMemberResponse::new(target.id))
    }
}
