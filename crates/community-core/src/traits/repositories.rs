//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Uniqueness rules (one membership per user and
//! community, unique role names, unique slugs, unique emails) are enforced by
//! the implementations atomically and reported as conflict errors.

use async_trait::async_trait;

use crate::entities::{Community, Member, Role, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Page request, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Clamp raw values into a valid page
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    #[inline]
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

/// One page of results plus the total across all pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Number of pages of size `limit` needed for `total`
    pub fn pages(&self, limit: u32) -> u64 {
        self.total.div_ceil(u64::from(limit.max(1)))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Batch lookup; missing ids are skipped
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Create a new user. Fails with `EmailAlreadyExists` on a duplicate email.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Community Repository
// ============================================================================

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Community>>;

    /// Insert the community and its first admin membership as one unit.
    /// Either both rows become visible or neither does.
    async fn create_with_initial_admin(&self, community: &Community, admin: &Member)
        -> RepoResult<()>;

    /// Persist name, slug and `updated_at`
    async fn update(&self, community: &Community) -> RepoResult<()>;

    /// All communities, oldest first
    async fn list(&self, page: Page) -> RepoResult<Paged<Community>>;

    /// Communities where `user_id` holds a membership with role `role`
    async fn list_by_member_role(
        &self,
        user_id: Snowflake,
        role: &str,
        page: Page,
    ) -> RepoResult<Paged<Community>>;

    /// Communities where `user_id` holds any membership
    async fn list_by_member(&self, user_id: Snowflake, page: Page) -> RepoResult<Paged<Community>>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>>;

    async fn find_by_user_and_community(
        &self,
        user_id: Snowflake,
        community_id: Snowflake,
    ) -> RepoResult<Option<Member>>;

    async fn find_by_user_community_role(
        &self,
        user_id: Snowflake,
        community_id: Snowflake,
        role: &str,
    ) -> RepoResult<Option<Member>>;

    /// Earliest member of the community holding `role`
    async fn find_first_with_role(
        &self,
        community_id: Snowflake,
        role: &str,
    ) -> RepoResult<Option<Member>>;

    async fn exists(&self, user_id: Snowflake, community_id: Snowflake) -> RepoResult<bool>;

    /// Insert a membership. Fails with `AlreadyMember` if the user already
    /// belongs to the community, regardless of any earlier existence check.
    async fn insert(&self, member: &Member) -> RepoResult<()>;

    /// Delete a membership. Fails with `MemberNotFound` if no row was removed.
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Members of a community, oldest first
    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: Page,
    ) -> RepoResult<Paged<Member>>;
}

// ============================================================================
// Role Repository
// ============================================================================

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Role>>;

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>>;

    async fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Role>>;

    /// Create a role. Fails with `RoleAlreadyExists` on a duplicate name.
    async fn create(&self, role: &Role) -> RepoResult<()>;

    /// Create a role unless one with the same name exists. Returns whether a
    /// row was inserted; losing a concurrent race is not an error.
    async fn create_if_absent(&self, role: &Role) -> RepoResult<bool>;

    async fn list(&self, page: Page) -> RepoResult<Paged<Role>>;
}
