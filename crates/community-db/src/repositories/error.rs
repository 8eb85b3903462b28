//! Error mapping for repositories

use community_core::{DomainError, Member};
use sqlx::Error as SqlxError;

pub(crate) const MEMBERS_UNIQUE: &str = "members_community_user_key";
pub(crate) const COMMUNITIES_SLUG_UNIQUE: &str = "communities_slug_key";
pub(crate) const MEMBERS_USER_FK: &str = "members_user_id_fkey";
pub(crate) const MEMBERS_COMMUNITY_FK: &str = "members_community_id_fkey";

pub(crate) fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation to `on_unique`, anything else to a database error
pub(crate) fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => on_unique(db_err.constraint()),
        _ => map_db_error(e),
    }
}

/// Map a failed `members` insert: the pair constraint and both foreign keys
/// become the matching domain outcome
pub(crate) fn map_member_insert_error(e: SqlxError, member: &Member) -> DomainError {
    let mapped = e.as_database_error().and_then(|db_err| {
        if db_err.is_unique_violation() && db_err.constraint() == Some(MEMBERS_UNIQUE) {
            Some(DomainError::AlreadyMember)
        } else if db_err.is_foreign_key_violation() {
            match db_err.constraint() {
                Some(MEMBERS_USER_FK) => Some(DomainError::UserNotFound(member.user_id)),
                Some(MEMBERS_COMMUNITY_FK) => {
                    Some(DomainError::CommunityNotFound(member.community_id))
                }
                _ => None,
            }
        } else {
            None
        }
    });
    mapped.unwrap_or_else(|| map_db_error(e))
}

/// Saturating conversion for `COUNT(*)` results
pub(crate) fn to_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
