//! In-process implementation of every repository trait.
//!
//! All state sits behind one mutex, so each trait method is atomic with
//! respect to every other call, including the two-row community creation.
//! Uniqueness rules match the PostgreSQL schema.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::instrument;

use community_core::{
    Community, CommunityRepository, DomainError, Member, MemberRepository, Page, Paged,
    RepoResult, Role, RoleRepository, Snowflake, User, UserRepository,
};

#[derive(Debug, Default)]
struct State {
    // Keyed by snowflake, so iteration order is creation order
    users: BTreeMap<Snowflake, (User, String)>,
    communities: BTreeMap<Snowflake, Community>,
    members: BTreeMap<Snowflake, Member>,
    roles: BTreeMap<Snowflake, Role>,
}

impl State {
    fn slug_taken(&self, slug: &str, except: Option<Snowflake>) -> bool {
        self.communities
            .values()
            .any(|c| c.slug == slug && Some(c.id) != except)
    }

    fn membership(&self, user_id: Snowflake, community_id: Snowflake) -> Option<&Member> {
        self.members
            .values()
            .find(|m| m.user_id == user_id && m.community_id == community_id)
    }

    fn communities_where<F>(&self, pred: F, page: Page) -> Paged<Community>
    where
        F: Fn(&Member) -> bool,
    {
        let mut ids: Vec<Snowflake> = self
            .members
            .values()
            .filter(|m| pred(m))
            .map(|m| m.community_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();

        paginate(
            ids.iter().filter_map(|id| self.communities.get(id)).cloned(),
            page,
        )
    }
}

fn paginate<T>(items: impl Iterator<Item = T>, page: Page) -> Paged<T> {
    let all: Vec<T> = items.collect();
    let total = all.len() as u64;
    let start = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let items = all
        .into_iter()
        .skip(start)
        .take(page.limit as usize)
        .collect();
    Paged::new(items, total)
}

/// Shared handle; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a community without any member. Only for exercising the
    /// integrity checks; normal creation goes through
    /// [`CommunityRepository::create_with_initial_admin`].
    #[doc(hidden)]
    pub fn insert_orphan_community(&self, community: Community) {
        self.state.lock().communities.insert(community.id, community);
    }

    /// Overwrite the role name stored on a member row
    #[doc(hidden)]
    pub fn set_member_role(&self, member_id: Snowflake, role: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        let member = state
            .members
            .get_mut(&member_id)
            .ok_or(DomainError::MemberNotFound(member_id))?;
        member.role = role.to_string();
        Ok(())
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).map(|(u, _)| u.clone()))
            .collect())
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.state.lock().users.get(&id).map(|(_, h)| h.clone()))
    }
}

// ============================================================================
// Communities
// ============================================================================

#[async_trait]
impl CommunityRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Community>> {
        Ok(self.state.lock().communities.get(&id).cloned())
    }

    #[instrument(skip(self, community, admin), fields(community_id = %community.id))]
    async fn create_with_initial_admin(
        &self,
        community: &Community,
        admin: &Member,
    ) -> RepoResult<()> {
        let mut state = self.state.lock();
        // Validate everything before the first write so a failure leaves no trace
        if state.slug_taken(&community.slug, None) {
            return Err(DomainError::SlugTaken(community.slug.clone()));
        }
        if admin.community_id != community.id {
            return Err(DomainError::IntegrityViolation(
                "initial admin belongs to a different community".to_string(),
            ));
        }
        if !state.users.contains_key(&admin.user_id) {
            return Err(DomainError::UserNotFound(admin.user_id));
        }
        if state.communities.contains_key(&community.id) || state.members.contains_key(&admin.id) {
            return Err(DomainError::DatabaseError("duplicate primary key".to_string()));
        }

        state.communities.insert(community.id, community.clone());
        state.members.insert(admin.id, admin.clone());
        Ok(())
    }

    async fn update(&self, community: &Community) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.communities.contains_key(&community.id) {
            return Err(DomainError::CommunityNotFound(community.id));
        }
        if state.slug_taken(&community.slug, Some(community.id)) {
            return Err(DomainError::SlugTaken(community.slug.clone()));
        }
        state.communities.insert(community.id, community.clone());
        Ok(())
    }

    async fn list(&self, page: Page) -> RepoResult<Paged<Community>> {
        let state = self.state.lock();
        Ok(paginate(state.communities.values().cloned(), page))
    }

    async fn list_by_member_role(
        &self,
        user_id: Snowflake,
        role: &str,
        page: Page,
    ) -> RepoResult<Paged<Community>> {
        let state = self.state.lock();
        Ok(state.communities_where(|m| m.user_id == user_id && m.role == role, page))
    }

    async fn list_by_member(&self, user_id: Snowflake, page: Page) -> RepoResult<Paged<Community>> {
        let state = self.state.lock();
        Ok(state.communities_where(|m| m.user_id == user_id, page))
    }
}

// ============================================================================
// Members
// ============================================================================

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        Ok(self.state.lock().members.get(&id).cloned())
    }

    async fn find_by_user_and_community(
        &self,
        user_id: Snowflake,
        community_id: Snowflake,
    ) -> RepoResult<Option<Member>> {
        Ok(self.state.lock().membership(user_id, community_id).cloned())
    }

    async fn find_by_user_community_role(
        &self,
        user_id: Snowflake,
        community_id: Snowflake,
        role: &str,
    ) -> RepoResult<Option<Member>> {
        Ok(self
            .state
            .lock()
            .membership(user_id, community_id)
            .filter(|m| m.role == role)
            .cloned())
    }

    async fn find_first_with_role(
        &self,
        community_id: Snowflake,
        role: &str,
    ) -> RepoResult<Option<Member>> {
        Ok(self
            .state
            .lock()
            .members
            .values()
            .find(|m| m.community_id == community_id && m.role == role)
            .cloned())
    }

    async fn exists(&self, user_id: Snowflake, community_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().membership(user_id, community_id).is_some())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn insert(&self, member: &Member) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.membership(member.user_id, member.community_id).is_some() {
            return Err(DomainError::AlreadyMember);
        }
        if !state.communities.contains_key(&member.community_id) {
            return Err(DomainError::CommunityNotFound(member.community_id));
        }
        if !state.users.contains_key(&member.user_id) {
            return Err(DomainError::UserNotFound(member.user_id));
        }
        state.members.insert(member.id, member.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state
            .lock()
            .members
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::MemberNotFound(id))
    }

    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: Page,
    ) -> RepoResult<Paged<Member>> {
        let state = self.state.lock();
        Ok(paginate(
            state
                .members
                .values()
                .filter(|m| m.community_id == community_id)
                .cloned(),
            page,
        ))
    }
}

// ============================================================================
// Roles
// ============================================================================

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Role>> {
        Ok(self.state.lock().roles.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        Ok(self
            .state
            .lock()
            .roles
            .values()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Role>> {
        Ok(self
            .state
            .lock()
            .roles
            .values()
            .filter(|r| names.contains(&r.name))
            .cloned()
            .collect())
    }

    async fn create(&self, role: &Role) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.roles.values().any(|r| r.name == role.name) {
            return Err(DomainError::RoleAlreadyExists);
        }
        state.roles.insert(role.id, role.clone());
        Ok(())
    }

    async fn create_if_absent(&self, role: &Role) -> RepoResult<bool> {
        let mut state = self.state.lock();
        if state.roles.values().any(|r| r.name == role.name) {
            return Ok(false);
        }
        state.roles.insert(role.id, role.clone());
        Ok(true)
    }

    async fn list(&self, page: Page) -> RepoResult<Paged<Role>> {
        let state = self.state.lock();
        Ok(paginate(state.roles.values().cloned(), page))
    }
}
