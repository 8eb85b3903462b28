//! # community-db
//!
//! Storage layer implementing the repository traits from `community-core`.
//!
//! - PostgreSQL repositories via SQLx (`Pg*Repository`) plus pool and schema setup
//! - [`MemoryStore`], a single-process implementation with the same uniqueness
//!   and atomicity guarantees, used by tests and `DATABASE_URL=memory`
//!
//! ```rust,ignore
//! use community_db::{create_pool, run_migrations, PoolConfig, PgMemberRepository};
//!
//! let pool = create_pool(&PoolConfig::new(url)).await?;
//! run_migrations(&pool).await?;
//! let members = PgMemberRepository::new(pool);
//! ```

pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

mod mappers;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgCommunityRepository, PgMemberRepository, PgRoleRepository, PgUserRepository,
};
