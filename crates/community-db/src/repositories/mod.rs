//! PostgreSQL implementations of the repository traits defined in community-core.

mod community;
mod error;
mod member;
mod role;
mod user;

pub use community::PgCommunityRepository;
pub use member::PgMemberRepository;
pub use role::PgRoleRepository;
pub use user::PgUserRepository;
