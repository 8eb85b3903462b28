//! Authorization service
//!
//! Loads the membership rows the pure rules in `community_core::authorization`
//! need, and turns their deny values into service errors.

use community_core::{
    can_add_member, can_remove_member, CommunityRole, DomainError, Member, RemovalDecision,
    Snowflake,
};
use tracing::{debug, error, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AuthorizationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthorizationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Whether `actor_id` may add members to `community_id`
    #[instrument(skip(self))]
    pub async fn can_add_member(
        &self,
        actor_id: Snowflake,
        community_id: Snowflake,
    ) -> ServiceResult<bool> {
        let admin_row = self
            .ctx
            .member_repo()
            .find_by_user_community_role(actor_id, community_id, CommunityRole::ADMIN_NAME)
            .await?;

        Ok(can_add_member(admin_row.as_ref(), community_id))
    }

    /// Decide whether `actor_id` may remove `target`
    #[instrument(skip(self, target), fields(target_id = %target.id))]
    pub async fn can_remove_member(
        &self,
        actor_id: Snowflake,
        target: &Member,
    ) -> ServiceResult<RemovalDecision> {
        let actor = self
            .ctx
            .member_repo()
            .find_by_user_and_community(actor_id, target.community_id)
            .await?;

        let decision = can_remove_member(actor.as_ref(), target);
        debug!(?decision, "Removal decision");
        Ok(decision)
    }

    /// Membership pre-check. The store's uniqueness constraint remains the
    /// authority; a `false` here does not guarantee the insert will succeed.
    #[instrument(skip(self))]
    pub async fn check_member_existence(
        &self,
        user_id: Snowflake,
        community_id: Snowflake,
    ) -> ServiceResult<bool> {
        Ok(self.ctx.member_repo().exists(user_id, community_id).await?)
    }

    /// Require admin rights over `community_id`.
    ///
    /// A denial against a community with no admin at all is reported as an
    /// integrity violation instead of `NotPrivileged`.
    pub async fn require_admin(
        &self,
        actor_id: Snowflake,
        community_id: Snowflake,
    ) -> ServiceResult<()> {
        if self.can_add_member(actor_id, community_id).await? {
            return Ok(());
        }

        let any_admin = self
            .ctx
            .member_repo()
            .find_first_with_role(community_id, CommunityRole::ADMIN_NAME)
            .await?;

        if any_admin.is_none() {
            error!(community_id = %community_id, "Community has no admin member");
            return Err(DomainError::IntegrityViolation(format!(
                "community {community_id} has no admin member"
            ))
            .into());
        }

        Err(DomainError::NotPrivileged.into())
    }

    /// Require that `actor_id` may remove `target`
    pub async fn require_remove(&self, actor_id: Snowflake, target: &Member) -> ServiceResult<()> {
        match self.can_remove_member(actor_id, target).await? {
            RemovalDecision::Allowed => Ok(()),
            RemovalDecision::DeniedNotPrivileged => Err(DomainError::NotPrivileged.into()),
            RemovalDecision::DeniedEscalation => Err(DomainError::RoleEscalation.into()),
        }
    }
}
