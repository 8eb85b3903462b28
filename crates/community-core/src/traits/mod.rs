//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CommunityRepository, MemberRepository, Page, Paged, RepoResult, RoleRepository,
    UserRepository,
};
