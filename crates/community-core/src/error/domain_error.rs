//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Community not found: {0}")]
    CommunityNotFound(Snowflake),

    #[error("Role not found: {0}")]
    RoleNotFound(Snowflake),

    #[error("Member not found: {0}")]
    MemberNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("You are not authorized to perform this action.")]
    NotPrivileged,

    #[error("A moderator cannot remove a member who outranks them.")]
    RoleEscalation,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("User is already added in the community.")]
    AlreadyMember,

    #[error("User with this email address already exists.")]
    EmailAlreadyExists,

    #[error("Role with this name already exists.")]
    RoleAlreadyExists,

    #[error("A community with this slug already exists: {0}")]
    SlugTaken(String),

    // =========================================================================
    // Integrity Errors
    // =========================================================================
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_)
            | Self::CommunityNotFound(_)
            | Self::RoleNotFound(_)
            | Self::MemberNotFound(_) => "RESOURCE_NOT_FOUND",

            Self::ValidationError(_) => "INVALID_INPUT",

            Self::NotPrivileged | Self::RoleEscalation => "NOT_ALLOWED_ACCESS",

            Self::AlreadyMember
            | Self::EmailAlreadyExists
            | Self::RoleAlreadyExists
            | Self::SlugTaken(_) => "RESOURCE_EXISTS",

            Self::IntegrityViolation(_) | Self::DatabaseError(_) | Self::InternalError(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Request field the error refers to, when there is one
    pub fn param(&self) -> Option<&'static str> {
        match self {
            Self::UserNotFound(_) => Some("user"),
            Self::CommunityNotFound(_) => Some("community"),
            Self::RoleNotFound(_) => Some("role"),
            Self::EmailAlreadyExists => Some("email"),
            Self::RoleAlreadyExists | Self::SlugTaken(_) => Some("name"),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CommunityNotFound(_)
                | Self::RoleNotFound(_)
                | Self::MemberNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPrivileged | Self::RoleEscalation)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyMember | Self::EmailAlreadyExists | Self::RoleAlreadyExists | Self::SlugTaken(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::UserNotFound(Snowflake::new(1)).code(), "RESOURCE_NOT_FOUND");
        assert_eq!(DomainError::RoleEscalation.code(), "NOT_ALLOWED_ACCESS");
        assert_eq!(DomainError::AlreadyMember.code(), "RESOURCE_EXISTS");
        assert_eq!(
            DomainError::IntegrityViolation("no admin".to_string()).code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_params_distinguish_missing_entities() {
        assert_eq!(DomainError::UserNotFound(Snowflake::new(1)).param(), Some("user"));
        assert_eq!(DomainError::CommunityNotFound(Snowflake::new(1)).param(), Some("community"));
        assert_eq!(DomainError::RoleNotFound(Snowflake::new(1)).param(), Some("role"));
        assert_eq!(DomainError::MemberNotFound(Snowflake::new(1)).param(), None);
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::MemberNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::NotPrivileged.is_authorization());
        assert!(DomainError::RoleEscalation.is_authorization());
        assert!(DomainError::AlreadyMember.is_conflict());
        assert!(!DomainError::IntegrityViolation(String::new()).is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::CommunityNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Community not found: 123");
    }
}
