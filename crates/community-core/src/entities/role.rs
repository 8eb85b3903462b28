//! Role entity - a globally named role that members are assigned by name

use chrono::{DateTime, Utc};

use crate::value_objects::{CommunityRole, Snowflake};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn new(id: Snowflake, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Row for one of the seeded roles
    pub fn canonical(id: Snowflake, role: CommunityRole) -> Self {
        Self::new(id, role.name().to_string())
    }

    /// Rank of this role, if it is one of the seeded roles
    pub fn community_role(&self) -> Option<CommunityRole> {
        CommunityRole::from_name(&self.name)
    }
}
