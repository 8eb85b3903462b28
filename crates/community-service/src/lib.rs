//! # community-service
//!
//! Application layer: orchestrates lookups, authorization decisions and store
//! mutations for users, communities, members and roles.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, AuthorizationService, CommunityService, MemberService, RoleService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
