//! Data transfer objects for API requests and responses

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddMemberRequest, CreateCommunityRequest, CreateRoleRequest, PageQuery, SigninRequest,
    SignupRequest, UpdateCommunityRequest,
};

pub use responses::{
    AuthResponse, CommunityResponse, CommunityWithOwnerResponse, MemberDetailResponse,
    MemberResponse, PageMeta, PagedResponse, RemovedMemberResponse, RoleResponse, RoleSummary,
    UserResponse, UserSummary,
};
