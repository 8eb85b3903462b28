//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request and is cheap to construct.

pub mod auth;
pub mod authorization;
pub mod community;
pub mod context;
pub mod error;
pub mod member;
pub mod role;

pub use auth::AuthService;
pub use authorization::AuthorizationService;
pub use community::CommunityService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use member::MemberService;
pub use role::RoleService;

use crate::dto::requests::{normalize_name, NAME_TOO_SHORT};

/// Trimmed display name, or a validation error when it is too short
pub(crate) fn require_name(raw: &str) -> ServiceResult<String> {
    normalize_name(raw).ok_or_else(|| ServiceError::validation(NAME_TOO_SHORT))
}
