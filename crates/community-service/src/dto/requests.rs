//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use std::borrow::Cow;

use community_core::{Page, Snowflake};
use serde::Deserialize;
use validator::{Validate, ValidationError};

pub const MIN_NAME_CHARS: usize = 2;
pub const NAME_TOO_SHORT: &str = "Name should be at least 2 characters.";

/// Trim surrounding whitespace; `None` when fewer than [`MIN_NAME_CHARS`] remain
pub fn normalize_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    (name.chars().count() >= MIN_NAME_CHARS).then(|| name.to_string())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    match normalize_name(name) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("length").with_message(Cow::Borrowed(NAME_TOO_SHORT))),
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        custom(function = "validate_name"),
        length(max = 64, message = "Name should be at most 64 characters.")
    )]
    pub name: String,

    #[validate(email(message = "Please provide a valid email address."))]
    pub email: String,

    #[validate(length(min = 2, max = 128, message = "Password should be at least 2 characters."))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Please provide a valid email address."))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

// ============================================================================
// Community Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommunityRequest {
    #[validate(
        custom(function = "validate_name"),
        length(max = 128, message = "Name should be at most 128 characters.")
    )]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommunityRequest {
    #[validate(
        custom(function = "validate_name"),
        length(max = 128, message = "Name should be at most 128 characters.")
    )]
    pub name: String,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Ids accept either JSON strings or numbers
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMemberRequest {
    pub community: Snowflake,
    pub user: Snowflake,
    pub role: Snowflake,
}

// ============================================================================
// Role Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(
        custom(function = "validate_name"),
        length(max = 64, message = "Name should be at most 64 characters.")
    )]
    pub name: String,
}

// ============================================================================
// Pagination
// ============================================================================

/// `?page=&limit=` query string
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1, message = "Page must be at least 1."))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100."))]
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(Page::DEFAULT_LIMIT),
        )
    }
}
