//! Canonical community roles and their ranking

use std::fmt;

/// The three seeded roles, ordered by privilege.
///
/// Ordering is by [`CommunityRole::rank`], so `Admin > Moderator > Member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommunityRole {
    Member = 1,
    Moderator = 2,
    Admin = 3,
}

impl CommunityRole {
    pub const ADMIN_NAME: &'static str = "Community Admin";
    pub const MODERATOR_NAME: &'static str = "Community Moderator";
    pub const MEMBER_NAME: &'static str = "Community Member";

    /// Every canonical role, highest rank first
    pub const ALL: [CommunityRole; 3] = [Self::Admin, Self::Moderator, Self::Member];

    /// Stored role name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Admin => Self::ADMIN_NAME,
            Self::Moderator => Self::MODERATOR_NAME,
            Self::Member => Self::MEMBER_NAME,
        }
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Resolve a stored role name. Custom role names resolve to `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == name)
    }

    /// Roles allowed to remove members
    #[inline]
    pub const fn can_moderate(self) -> bool {
        matches!(self, Self::Admin | Self::Moderator)
    }
}

impl fmt::Display for CommunityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
