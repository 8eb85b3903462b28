//! Authentication service
//!
//! Handles signup, signin, and resolving a bearer token to its user.

use community_common::AppError;
use community_core::{DomainError, Snowflake, User};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, SigninRequest, SignupRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and sign them in
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<AuthResponse> {
        let name = super::require_name(&request.name)?;
        let user = User::new(self.ctx.generate_id(), name, request.email);

        if self.ctx.user_repo().find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        // A concurrent signup with the same email is rejected by the store
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User signed up");

        self.respond_with_token(user)
    }

    /// Exchange credentials for an access token
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signin(&self, request: SigninRequest) -> ServiceResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        let Some(user) = self.ctx.user_repo().find_by_email(&email).await? else {
            warn!("Signin attempt for unknown email");
            return Err(AppError::InvalidCredentials.into());
        };

        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if let Err(e) = self.ctx.password_service().verify_or_error(&request.password, &hash) {
            warn!(user_id = %user.id, "Signin with wrong password");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User signed in");

        self.respond_with_token(user)
    }

    /// The authenticated user's profile
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        Ok(user.into())
    }

    /// Resolve a bearer token to an existing user.
    ///
    /// Bad or expired tokens, and tokens for users that no longer exist, all
    /// come back as `NotSignedIn`.
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let user_id = self
            .ctx
            .jwt_service()
            .verify(token)
            .and_then(|claims| claims.user_id())
            .map_err(|_| AppError::NotSignedIn)?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotSignedIn.into())
    }

    fn respond_with_token(&self, user: User) -> ServiceResult<AuthResponse> {
        let token = self.ctx.jwt_service().issue(user.id)?;
        Ok(AuthResponse {
            user: user.into(),
            access_token: token.access_token,
        })
    }
}
