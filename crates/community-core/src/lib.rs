//! # community-core
//!
//! Domain layer containing entities, value objects, the membership authorization
//! rules, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod authorization;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use authorization::{can_add_member, can_remove_member, RemovalDecision};
pub use entities::{Community, Member, Role, User};
pub use error::DomainError;
pub use traits::{
    CommunityRepository, MemberRepository, Page, Paged, RepoResult, RoleRepository,
    UserRepository,
};
pub use value_objects::{slugify, CommunityRole, Snowflake, SnowflakeGenerator, SnowflakeParseError};
