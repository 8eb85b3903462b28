//! Value objects - immutable types that represent domain concepts

mod community_role;
mod slug;
mod snowflake;

pub use community_role::CommunityRole;
pub use slug::slugify;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
