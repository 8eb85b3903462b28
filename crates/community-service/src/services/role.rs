//! Role service
//!
//! Seeds the canonical roles and manages custom ones.

use community_core::{CommunityRole, Page, Role};
use tracing::{info, instrument, warn};

use crate::dto::{CreateRoleRequest, PagedResponse, RoleResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Make sure every canonical role exists exactly once.
    ///
    /// Safe to run from several processes at once: losing an insert race is
    /// treated as success. A failure on one role does not stop the others;
    /// the last failure is returned after all three were attempted. Returns
    /// how many roles this call inserted.
    #[instrument(skip(self))]
    pub async fn ensure_seeded(&self) -> ServiceResult<usize> {
        let mut inserted = 0;
        let mut failure: Option<ServiceError> = None;

        for role in CommunityRole::ALL {
            match self.seed_one(role).await {
                Ok(true) => {
                    info!(role = role.name(), "Seeded role");
                    inserted += 1;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(role = role.name(), error = %e, "Failed to seed role");
                    failure = Some(e);
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(inserted),
        }
    }

    async fn seed_one(&self, role: CommunityRole) -> ServiceResult<bool> {
        if self.ctx.role_repo().find_by_name(role.name()).await?.is_some() {
            return Ok(false);
        }
        let row = Role::canonical(self.ctx.generate_id(), role);
        Ok(self.ctx.role_repo().create_if_absent(&row).await?)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CreateRoleRequest) -> ServiceResult<RoleResponse> {
        let name = super::require_name(&request.name)?;

        let role = Role::new(self.ctx.generate_id(), name);
        // Duplicate names come back as `RoleAlreadyExists`
        self.ctx.role_repo().create(&role).await?;

        info!(role_id = %role.id, name = %role.name, "Role created");

        Ok(role.into())
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: Page) -> ServiceResult<PagedResponse<RoleResponse>> {
        let roles = self.ctx.role_repo().list(page).await?;
        Ok(PagedResponse::new(roles.map(RoleResponse::from), page))
    }
}
