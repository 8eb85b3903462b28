//! Signup/signin and role management over the in-memory store

mod common;

use common::Harness;
use community_common::{AppError, JwtService};
use community_core::{CommunityRole, DomainError, Page, Snowflake};
use community_service::dto::{CreateRoleRequest, SigninRequest, SignupRequest};
use community_service::{AuthService, RoleService, ServiceError};

fn signup_request(email: &str) -> SignupRequest {
    SignupRequest {
        name: "Ada".to_string(),
        email: email.to_string(),
        password: "correct horse".to_string(),
    }
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_signup_then_signin() {
    let h = Harness::empty();
    let auth = AuthService::new(&h.ctx);

    let signed_up = auth.signup(signup_request("Ada@Example.com")).await.unwrap();
    assert_eq!(signed_up.user.email, "ada@example.com");
    assert!(!signed_up.access_token.is_empty());

    let signed_in = auth
        .signin(SigninRequest {
            email: "ADA@example.com".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(signed_in.user.id, signed_up.user.id);

    let user = auth.authenticate(&signed_in.access_token).await.unwrap();
    assert_eq!(user.id, signed_up.user.id);

    let me = auth.me(user.id).await.unwrap();
    assert_eq!(me.name, "Ada");
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let h = Harness::empty();
    let auth = AuthService::new(&h.ctx);
    auth.signup(signup_request("ada@example.com")).await.unwrap();

    let err = auth.signup(signup_request(" ada@EXAMPLE.com")).await.unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert_eq!(err.param(), Some("email"));
    assert!(matches!(err, ServiceError::Domain(DomainError::EmailAlreadyExists)));
}

#[tokio::test]
async fn test_signup_rejects_padded_short_name() {
    let h = Harness::empty();
    let mut request = signup_request("ada@example.com");
    request.name = "  x  ".to_string();

    let err = AuthService::new(&h.ctx).signup(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(h.ctx.user_repo().find_by_email("ada@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_bad_credentials() {
    let h = Harness::empty();
    let auth = AuthService::new(&h.ctx);
    auth.signup(signup_request("ada@example.com")).await.unwrap();

    for (email, password) in [("ada@example.com", "wrong"), ("nobody@example.com", "correct horse")] {
        let err = auth
            .signin(SigninRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(err.status_code(), 401);
    }
}

#[tokio::test]
async fn test_authenticate_rejects_bad_tokens() {
    let h = Harness::empty();
    let auth = AuthService::new(&h.ctx);

    let err = auth.authenticate("garbage").await.unwrap_err();
    assert!(matches!(err, ServiceError::App(AppError::NotSignedIn)));

    // Valid signature, but the user does not exist
    let token = JwtService::new(common::JWT_SECRET, 3600)
        .issue(Snowflake::new(424_242))
        .unwrap();
    let err = auth.authenticate(&token.access_token).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_SIGNEDIN");

    // Signed with a different key
    let foreign = JwtService::new("some-other-secret-that-is-long-enough", 3600)
        .issue(Snowflake::new(1))
        .unwrap();
    assert!(auth.authenticate(&foreign.access_token).await.is_err());
}

#[tokio::test]
async fn test_me_for_unknown_user() {
    let h = Harness::empty();
    let err = AuthService::new(&h.ctx).me(Snowflake::new(3)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::UserNotFound(_))));
}

// ============================================================================
// Roles
// ============================================================================

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let h = Harness::empty();
    let roles = RoleService::new(&h.ctx);

    assert_eq!(roles.ensure_seeded().await.unwrap(), 3);
    assert_eq!(roles.ensure_seeded().await.unwrap(), 0);

    let listed = roles.list(Page::default()).await.unwrap();
    assert_eq!(listed.meta.total, 3);
    for role in CommunityRole::ALL {
        assert!(listed.data.iter().any(|r| r.name == role.name()));
    }
}

#[tokio::test]
async fn test_concurrent_seeding() {
    let h = Harness::empty();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let ctx = h.ctx.clone();
            tokio::spawn(async move { RoleService::new(&ctx).ensure_seeded().await })
        })
        .collect();

    let mut inserted = 0;
    for task in tasks {
        inserted += task.await.unwrap().unwrap();
    }
    assert_eq!(inserted, 3);

    let listed = RoleService::new(&h.ctx).list(Page::default()).await.unwrap();
    assert_eq!(listed.meta.total, 3);
}

#[tokio::test]
async fn test_create_custom_role() {
    let h = Harness::seeded().await;
    let roles = RoleService::new(&h.ctx);

    let created = roles
        .create(CreateRoleRequest {
            name: "Event Host".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Event Host");

    let err = roles
        .create(CreateRoleRequest {
            name: "Event Host".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert_eq!(err.param(), Some("name"));

    let err = roles
        .create(CreateRoleRequest {
            name: CommunityRole::ADMIN_NAME.to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::RoleAlreadyExists)));

    let err = roles
        .create(CreateRoleRequest {
            name: "  x  ".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(err.status_code(), 400);

    let listed = roles.list(Page::new(1, 2)).await.unwrap();
    assert_eq!(listed.meta.total, 4);
    assert_eq!(listed.meta.pages, 2);
    assert_eq!(listed.data.len(), 2);
}
