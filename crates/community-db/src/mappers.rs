//! Model -> entity conversions

use community_core::{Community, Member, Role, Snowflake, User};

use crate::models::{CommunityModel, MemberModel, RoleModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

impl From<CommunityModel> for Community {
    fn from(model: CommunityModel) -> Self {
        Community {
            id: Snowflake::new(model.id),
            name: model.name,
            slug: model.slug,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: Snowflake::new(model.id),
            community_id: Snowflake::new(model.community_id),
            user_id: Snowflake::new(model.user_id),
            role: model.role,
            created_at: model.created_at,
        }
    }
}

impl From<RoleModel> for Role {
    fn from(model: RoleModel) -> Self {
        Role {
            id: Snowflake::new(model.id),
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_member_model_keeps_role_name() {
        let model = MemberModel {
            id: 1,
            community_id: 2,
            user_id: 3,
            role: "Community Moderator".to_string(),
            created_at: Utc::now(),
        };
        let member = Member::from(model);
        assert_eq!(member.community_id, Snowflake::new(2));
        assert_eq!(member.role, "Community Moderator");
    }
}
