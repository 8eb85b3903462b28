//! Membership authorization rules.
//!
//! Pure decisions over membership rows that the caller has already loaded:
//! no IO and no mutation. Storage lookups are done by the service layer.

use crate::entities::Member;
use crate::value_objects::{CommunityRole, Snowflake};

/// Outcome of a member removal check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalDecision {
    Allowed,
    /// Actor is not a member of the community, or holds no moderating role
    DeniedNotPrivileged,
    /// Actor moderates, but the target outranks them
    DeniedEscalation,
}

impl RemovalDecision {
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Whether `actor` may add members to `community_id`.
///
/// Only the admin role grants this. Moderators can remove members but not
/// add them.
pub fn can_add_member(actor: Option<&Member>, community_id: Snowflake) -> bool {
    actor.is_some_and(|m| m.community_id == community_id && m.has_role(CommunityRole::Admin))
}

/// Whether `actor` may remove `target`.
///
/// Admins and moderators may remove anyone whose rank does not exceed their
/// own, so a moderator can never remove an admin. Self-removal is not
/// special-cased.
pub fn can_remove_member(actor: Option<&Member>, target: &Member) -> RemovalDecision {
    let Some(actor) = actor else {
        return RemovalDecision::DeniedNotPrivileged;
    };
    if actor.community_id != target.community_id {
        return RemovalDecision::DeniedNotPrivileged;
    }

    let Some(actor_role) = actor.community_role().filter(|r| r.can_moderate()) else {
        return RemovalDecision::DeniedNotPrivileged;
    };

    if target.rank() > actor_role {
        RemovalDecision::DeniedEscalation
    } else {
        RemovalDecision::Allowed
    }
}
