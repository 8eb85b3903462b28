//! Response DTOs for API endpoints
//!
//! Snowflake IDs serialize as decimal strings.

use chrono::{DateTime, Utc};
use community_core::{Paged, Snowflake};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: u64,
    pub pages: u64,
    pub page: u32,
}

/// One page of items plus its meta block
#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PagedResponse<T> {
    pub fn new(paged: Paged<T>, page: community_core::Page) -> Self {
        let meta = PageMeta {
            total: paged.total,
            pages: paged.pages(page.limit),
            page: page.page,
        };
        Self {
            data: paged.items,
            meta,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// `{id, name}` reference embedded in other responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: Snowflake,
    pub name: String,
}

/// Signed-in user plus a fresh access token
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
}

// ============================================================================
// Community Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommunityResponse {
    pub id: Snowflake,
    pub name: String,
    pub slug: String,
    pub owner: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing entry; `owner` is the earliest admin, `null` if none is left
#[derive(Debug, Clone, Serialize)]
pub struct CommunityWithOwnerResponse {
    pub id: Snowflake,
    pub name: String,
    pub slug: String,
    pub owner: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: Snowflake,
    pub community: Snowflake,
    pub user: Snowflake,
    /// Id of the role that was assigned
    pub role: Snowflake,
    pub created_at: DateTime<Utc>,
}

/// Role reference resolved from a member's role name. `id` is empty when
/// the name no longer matches a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberDetailResponse {
    pub id: Snowflake,
    pub community: Snowflake,
    pub user: Option<UserSummary>,
    pub role: RoleSummary,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemovedMemberResponse {
    pub id: Snowflake,
    pub message: &'static str,
}

impl RemovedMemberResponse {
    pub const MESSAGE: &'static str = "Member removed successfully";

    pub fn new(id: Snowflake) -> Self {
        Self {
            id,
            message: Self::MESSAGE,
        }
    }
}

// ============================================================================
// Role Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RoleResponse {
    pub id: Snowflake,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
