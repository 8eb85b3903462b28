//! Domain entities - core business objects

mod community;
mod member;
mod role;
mod user;

pub use community::Community;
pub use member::Member;
pub use role::Role;
pub use user::User;
