//! Community service
//!
//! Creation (together with the creator's admin membership), renaming, and
//! the community and member listings.

use std::collections::{BTreeSet, HashMap};

use community_core::{
    Community, CommunityRole, DomainError, Member, Page, Paged, Role, Snowflake, User,
};
use tracing::{info, instrument};

use crate::dto::{
    CommunityResponse, CommunityWithOwnerResponse, CreateCommunityRequest, MemberDetailResponse,
    PagedResponse, UpdateCommunityRequest, UserSummary,
};

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct CommunityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommunityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a community owned by `creator_id`.
    ///
    /// The community row and the creator's admin membership are written as
    /// one unit; a slug collision leaves neither behind.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        creator_id: Snowflake,
        request: CreateCommunityRequest,
    ) -> ServiceResult<CommunityResponse> {
        let community = Community::new(self.ctx.generate_id(), super::require_name(&request.name)?);
        if community.slug.is_empty() {
            return Err(ServiceError::validation(
                "Name must contain at least one letter or digit.",
            ));
        }

        let admin = Member::initial_admin(self.ctx.generate_id(), community.id, creator_id);

        self.ctx
            .community_repo()
            .create_with_initial_admin(&community, &admin)
            .await?;

        info!(
            community_id = %community.id,
            slug = %community.slug,
            owner_id = %creator_id,
            "Community created"
        );

        Ok(CommunityResponse::from_community(community, creator_id))
    }

    /// Rename a community; admin only. The slug is recomputed.
    #[instrument(skip(self, request))]
    pub async fn rename(
        &self,
        actor_id: Snowflake,
        community_id: Snowflake,
        request: UpdateCommunityRequest,
    ) -> ServiceResult<CommunityResponse> {
        let name = super::require_name(&request.name)?;
        let mut community = self.find(community_id).await?;

        AuthorizationService::new(self.ctx)
            .require_admin(actor_id, community_id)
            .await?;

        community.rename(name);
        if community.slug.is_empty() {
            return Err(ServiceError::validation(
                "Name must contain at least one letter or digit.",
            ));
        }

        self.ctx.community_repo().update(&community).await?;

        info!(community_id = %community_id, slug = %community.slug, "Community renamed");

        let owner = self
            .ctx
            .member_repo()
            .find_first_with_role(community_id, CommunityRole::ADMIN_NAME)
            .await?
            .map_or(actor_id, |m| m.user_id);

        Ok(CommunityResponse::from_community(community, owner))
    }

    /// Every community, each with its earliest admin as owner
    #[instrument(skip(self))]
    pub async fn list_all(&self, page: Page) -> ServiceResult<PagedResponse<CommunityWithOwnerResponse>> {
        let communities = self.ctx.community_repo().list(page).await?;
        let listed = self.with_owners(communities).await?;
        Ok(PagedResponse::new(listed, page))
    }

    /// Communities where `user_id` is an admin
    #[instrument(skip(self))]
    pub async fn list_owned(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> ServiceResult<PagedResponse<CommunityResponse>> {
        let communities = self
            .ctx
            .community_repo()
            .list_by_member_role(user_id, CommunityRole::ADMIN_NAME, page)
            .await?;

        let owned = communities.map(|c| CommunityResponse::from_community(c, user_id));
        Ok(PagedResponse::new(owned, page))
    }

    /// Communities where `user_id` holds any membership
    #[instrument(skip(self))]
    pub async fn list_joined(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> ServiceResult<PagedResponse<CommunityWithOwnerResponse>> {
        let communities = self
            .ctx
            .community_repo()
            .list_by_member(user_id, page)
            .await?;
        let listed = self.with_owners(communities).await?;
        Ok(PagedResponse::new(listed, page))
    }

    /// Members of a community with their user and resolved role
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        community_id: Snowflake,
        page: Page,
    ) -> ServiceResult<PagedResponse<MemberDetailResponse>> {
        self.find(community_id).await?;

        let members = self
            .ctx
            .member_repo()
            .find_by_community(community_id, page)
            .await?;

        let user_ids: Vec<Snowflake> = members.items.iter().map(|m| m.user_id).collect();
        let users = self.users_by_id(&user_ids).await?;

        let role_names: Vec<String> = members
            .items
            .iter()
            .map(|m| m.role.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let roles: HashMap<String, Role> = self
            .ctx
            .role_repo()
            .find_by_names(&role_names)
            .await?
            .into_iter()
            .map(|r| (r.name.clone(), r))
            .collect();

        let details = members.map(|m| {
            let user = users.get(&m.user_id).map(UserSummary::from);
            let role = roles.get(&m.role);
            MemberDetailResponse::from_member(m, user, role)
        });
        Ok(PagedResponse::new(details, page))
    }

    async fn find(&self, community_id: Snowflake) -> ServiceResult<Community> {
        Ok(self
            .ctx
            .community_repo()
            .find_by_id(community_id)
            .await?
            .ok_or(DomainError::CommunityNotFound(community_id))?)
    }

    async fn users_by_id(&self, ids: &[Snowflake]) -> ServiceResult<HashMap<Snowflake, User>> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect())
    }

    async fn with_owners(
        &self,
        communities: Paged<Community>,
    ) -> ServiceResult<Paged<CommunityWithOwnerResponse>> {
        let mut owner_ids = HashMap::with_capacity(communities.items.len());
        for community in &communities.items {
            if let Some(admin) = self
                .ctx
                .member_repo()
                .find_first_with_role(community.id, CommunityRole::ADMIN_NAME)
                .await?
            {
                owner_ids.insert(community.id, admin.user_id);
            }
        }

        let ids: Vec<Snowflake> = owner_ids.values().copied().collect();
        let users = self.users_by_id(&ids).await?;

        Ok(communities.map(|c| {
            let owner = owner_ids
                .get(&c.id)
                .and_then(|id| users.get(id))
                .map(UserSummary::from);
            CommunityWithOwnerResponse::from_community(c, owner)
        }))
    }
}
