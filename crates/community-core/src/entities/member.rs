//! Member entity - one user's membership and role in one community

use chrono::{DateTime, Utc};

use crate::value_objects::{CommunityRole, Snowflake};

/// Membership row. The role is stored by name, copied from the role at the
/// time the member was added; read it through [`Member::rank`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub user_id: Snowflake,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(id: Snowflake, community_id: Snowflake, user_id: Snowflake, role: String) -> Self {
        Self {
            id,
            community_id,
            user_id,
            role,
            created_at: Utc::now(),
        }
    }

    /// The admin row created together with a community
    pub fn initial_admin(id: Snowflake, community_id: Snowflake, creator_id: Snowflake) -> Self {
        Self::new(
            id,
            community_id,
            creator_id,
            CommunityRole::Admin.name().to_string(),
        )
    }

    /// Canonical role held, `None` for custom role names
    pub fn community_role(&self) -> Option<CommunityRole> {
        CommunityRole::from_name(&self.role)
    }

    /// Privilege rank used for comparisons. Custom roles rank as members.
    pub fn rank(&self) -> CommunityRole {
        self.community_role().unwrap_or(CommunityRole::Member)
    }

    #[inline]
    pub fn has_role(&self, role: CommunityRole) -> bool {
        self.role == role.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_admin() {
        let member = Member::initial_admin(Snowflake::new(1), Snowflake::new(10), Snowflake::new(20));
        assert_eq!(member.role, "Community Admin");
        assert!(member.has_role(CommunityRole::Admin));
        assert_eq!(member.rank(), CommunityRole::Admin);
    }

    #[test]
    fn test_custom_role_ranks_as_member() {
        let member = Member::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            "Event Host".to_string(),
        );
        assert_eq!(member.community_role(), None);
        assert_eq!(member.rank(), CommunityRole::Member);
        assert!(!member.has_role(CommunityRole::Member));
    }
}
