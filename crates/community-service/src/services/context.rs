//! Service context - dependency container for services
//!
//! Holds the repositories, the token and password services, and the id
//! generator. Cloning is cheap; every clone shares the same backends.

use std::sync::Arc;

use community_common::{JwtService, PasswordService};
use community_core::{
    CommunityRepository, MemberRepository, RoleRepository, Snowflake, SnowflakeGenerator,
    UserRepository,
};
use community_db::{
    MemoryStore, PgCommunityRepository, PgMemberRepository, PgPool, PgRoleRepository,
    PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct ServiceContext {
    // Present only when backed by PostgreSQL
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    community_repo: Arc<dyn CommunityRepository>,
    member_repo: Arc<dyn MemberRepository>,
    role_repo: Arc<dyn RoleRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::default()
    }

    /// Context over PostgreSQL repositories sharing `pool`
    pub fn postgres(
        pool: PgPool,
        jwt_service: JwtService,
        snowflake_generator: SnowflakeGenerator,
    ) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            community_repo: Arc::new(PgCommunityRepository::new(pool.clone())),
            member_repo: Arc::new(PgMemberRepository::new(pool.clone())),
            role_repo: Arc::new(PgRoleRepository::new(pool.clone())),
            pool: Some(pool),
            jwt_service: Arc::new(jwt_service),
            password_service: PasswordService::new(),
            snowflake_generator: Arc::new(snowflake_generator),
        }
    }

    /// Context where every repository is the same in-process store
    pub fn in_memory(
        store: MemoryStore,
        jwt_service: JwtService,
        snowflake_generator: SnowflakeGenerator,
    ) -> Self {
        let store = Arc::new(store);
        Self {
            pool: None,
            user_repo: store.clone(),
            community_repo: store.clone(),
            member_repo: store.clone(),
            role_repo: store,
            jwt_service: Arc::new(jwt_service),
            password_service: PasswordService::new(),
            snowflake_generator: Arc::new(snowflake_generator),
        }
    }

    // === Database Pool ===

    /// The PostgreSQL pool, `None` for the in-memory backend
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn community_repo(&self) -> &dyn CommunityRepository {
        self.community_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn role_repo(&self) -> &dyn RoleRepository {
        self.role_repo.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn password_service(&self) -> PasswordService {
        self.password_service
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("backend", &if self.pool.is_some() { "postgres" } else { "memory" })
            .finish_non_exhaustive()
    }
}

/// Builder for [`ServiceContext`] with individually supplied repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    community_repo: Option<Arc<dyn CommunityRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    role_repo: Option<Arc<dyn RoleRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn community_repo(mut self, repo: Arc<dyn CommunityRepository>) -> Self {
        self.community_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn role_repo(mut self, repo: Arc<dyn RoleRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            community_repo: self
                .community_repo
                .ok_or_else(|| ServiceError::validation("community_repo is required"))?,
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            role_repo: self
                .role_repo
                .ok_or_else(|| ServiceError::validation("role_repo is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            password_service: PasswordService::new(),
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
        })
    }
}
