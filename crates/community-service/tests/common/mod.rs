//! Shared setup for the service tests: a seeded in-memory context plus
//! helpers for users, communities and memberships.

#![allow(dead_code)]

use community_common::JwtService;
use community_core::{CommunityRole, Snowflake, SnowflakeGenerator, User};
use community_db::MemoryStore;
use community_service::dto::{AddMemberRequest, CreateCommunityRequest};
use community_service::{CommunityService, MemberService, RoleService, ServiceContext};

pub const JWT_SECRET: &str = "service-tests-secret-that-is-long-enough";

pub struct Harness {
    pub ctx: ServiceContext,
    pub store: MemoryStore,
}

impl Harness {
    /// Fresh store with the canonical roles seeded
    pub async fn seeded() -> Self {
        let harness = Self::empty();
        RoleService::new(&harness.ctx).ensure_seeded().await.unwrap();
        harness
    }

    pub fn empty() -> Self {
        let store = MemoryStore::new();
        let ctx = ServiceContext::in_memory(
            store.clone(),
            JwtService::new(JWT_SECRET, 3600),
            SnowflakeGenerator::new(7),
        );
        Self { ctx, store }
    }

    /// Insert a user directly, bypassing password hashing
    pub async fn user(&self, name: &str) -> Snowflake {
        let id = self.ctx.generate_id();
        let user = User::new(id, name.to_string(), format!("{}-{id}@example.com", name.to_lowercase()));
        self.ctx
            .user_repo()
            .create(&user, "$argon2id$unused")
            .await
            .unwrap();
        id
    }

    pub async fn role_id(&self, role: CommunityRole) -> Snowflake {
        self.ctx
            .role_repo()
            .find_by_name(role.name())
            .await
            .unwrap()
            .unwrap()
            .id
    }

    pub async fn community(&self, owner: Snowflake, name: &str) -> Snowflake {
        CommunityService::new(&self.ctx)
            .create(
                owner,
                CreateCommunityRequest {
                    name: name.to_string(),
                },
            )
            .await
            .unwrap()
            .id
    }

    /// Add `user` as `role` on behalf of `actor`, returning the member id
    pub async fn add(
        &self,
        actor: Snowflake,
        community: Snowflake,
        user: Snowflake,
        role: CommunityRole,
    ) -> Snowflake {
        let role = self.role_id(role).await;
        MemberService::new(&self.ctx)
            .add_member(
                actor,
                AddMemberRequest {
                    community,
                    user,
                    role,
                },
            )
            .await
            .unwrap()
            .id
    }

    pub fn add_request(
        community: Snowflake,
        user: Snowflake,
        role: Snowflake,
    ) -> AddMemberRequest {
        AddMemberRequest {
            community,
            user,
            role,
        }
    }
}
