//! Entity to DTO mappers

use community_core::{Community, Member, Role, Snowflake, User};

use super::responses::{
    CommunityResponse, CommunityWithOwnerResponse, MemberDetailResponse, MemberResponse,
    RoleResponse, RoleSummary, UserResponse, UserSummary,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

// ============================================================================
// Community Mappers
// ============================================================================

impl CommunityResponse {
    pub fn from_community(community: Community, owner: Snowflake) -> Self {
        Self {
            id: community.id,
            name: community.name,
            slug: community.slug,
            owner,
            created_at: community.created_at,
            updated_at: community.updated_at,
        }
    }
}

impl CommunityWithOwnerResponse {
    pub fn from_community(community: Community, owner: Option<UserSummary>) -> Self {
        Self {
            id: community.id,
            name: community.name,
            slug: community.slug,
            owner,
            created_at: community.created_at,
            updated_at: community.updated_at,
        }
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl MemberResponse {
    pub fn from_member(member: &Member, role: &Role) -> Self {
        Self {
            id: member.id,
            community: member.community_id,
            user: member.user_id,
            role: role.id,
            created_at: member.created_at,
        }
    }
}

impl MemberDetailResponse {
    pub fn from_member(member: Member, user: Option<UserSummary>, role: Option<&Role>) -> Self {
        let role = RoleSummary {
            id: role.map(|r| r.id.to_string()).unwrap_or_default(),
            name: member.role,
        };
        Self {
            id: member.id,
            community: member.community_id,
            user,
            role,
            created_at: member.created_at,
        }
    }
}

// ============================================================================
// Role Mappers
// ============================================================================

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}
