//! API end-to-end tests over HTTP
//!
//! Each test starts its own server on an ephemeral port backed by the
//! in-memory store, so no external services are needed:
//!
//! ```bash
//! cargo test -p integration-tests --test api_tests
//! ```

use integration_tests::{
    assert_content, assert_error, config_with, AddMemberRequest, NameRequest, Session,
    SigninRequest, SignupRequest, TestServer,
};
use reqwest::StatusCode;

const ADMIN: &str = "Community Admin";
const MODERATOR: &str = "Community Moderator";
const MEMBER: &str = "Community Member";

async fn signup(server: &TestServer) -> Session {
    let response = server
        .post("/v1/auth/signup", &SignupRequest::unique())
        .await
        .unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    Session {
        id: content["data"]["id"].as_str().unwrap().to_string(),
        token: content["meta"]["access_token"].as_str().unwrap().to_string(),
    }
}

async fn role_id(server: &TestServer, name: &str) -> String {
    let response = server.get("/v1/role?limit=100").await.unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    content["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["name"] == name)
        .and_then(|r| r["id"].as_str())
        .unwrap()
        .to_string()
}

async fn create_community(server: &TestServer, owner: &Session, name: &str) -> String {
    let response = server
        .post_auth("/v1/community", &owner.token, &NameRequest::new(name))
        .await
        .unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    content["data"]["id"].as_str().unwrap().to_string()
}

async fn add_member(
    server: &TestServer,
    actor: &Session,
    community: &str,
    user: &Session,
    role: &str,
) -> reqwest::Response {
    let role = role_id(server, role).await;
    server
        .post_auth(
            "/v1/member",
            &actor.token,
            &AddMemberRequest::new(community, &user.id, &role),
        )
        .await
        .unwrap()
}

async fn member_id(server: &TestServer, community: &str, user: &Session) -> String {
    let response = server
        .get(&format!("/v1/community/{community}/members?limit=100"))
        .await
        .unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    content["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["user"]["id"] == user.id.as_str())
        .and_then(|m| m["id"].as_str())
        .unwrap()
        .to_string()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = server.get("/health/ready").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_signup_signin_me() {
    let server = TestServer::start().await.unwrap();
    let request = SignupRequest::unique();

    let response = server.post("/v1/auth/signup", &request).await.unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["data"]["email"], request.email.as_str());
    assert!(content["data"].get("password").is_none());

    let response = server
        .post("/v1/auth/signin", &SigninRequest::from_signup(&request))
        .await
        .unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    let token = content["meta"]["access_token"].as_str().unwrap().to_string();

    let response = server.get_auth("/v1/auth/me", &token).await.unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["data"]["name"], request.name.as_str());
}

#[tokio::test]
async fn test_duplicate_signup() {
    let server = TestServer::start().await.unwrap();
    let request = SignupRequest::unique();
    server.post("/v1/auth/signup", &request).await.unwrap();

    let response = server.post("/v1/auth/signup", &request).await.unwrap();
    let error = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error["code"], "RESOURCE_EXISTS");
    assert_eq!(error["param"], "email");
}

#[tokio::test]
async fn test_signin_wrong_password() {
    let server = TestServer::start().await.unwrap();
    let request = SignupRequest::unique();
    server.post("/v1/auth/signup", &request).await.unwrap();

    let mut signin = SigninRequest::from_signup(&request);
    signin.password = "not-it".to_string();
    let response = server.post("/v1/auth/signin", &signin).await.unwrap();
    let error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server.get_auth("/v1/auth/me", "garbage").await.unwrap();
    let error = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error["code"], "NOT_SIGNEDIN");
}

// ============================================================================
// Roles
// ============================================================================

#[tokio::test]
async fn test_roles_seeded_and_custom_role() {
    let server = TestServer::start().await.unwrap();
    let user = signup(&server).await;

    let response = server.get("/v1/role").await.unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["meta"]["total"], 3);

    let response = server
        .post_auth("/v1/role", &user.token, &NameRequest::new("Event Host"))
        .await
        .unwrap();
    assert_content(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth("/v1/role", &user.token, &NameRequest::new("Event Host"))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error["param"], "name");

    let response = server
        .post_auth("/v1/role", &user.token, &NameRequest::new("  x  "))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["param"], "name");
    assert_eq!(error["code"], "INVALID_INPUT");
}

// ============================================================================
// Communities
// ============================================================================

#[tokio::test]
async fn test_create_community_and_listings() {
    let server = TestServer::start().await.unwrap();
    let owner = signup(&server).await;

    let response = server
        .post_auth("/v1/community", &owner.token, &NameRequest::new("Acme"))
        .await
        .unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["data"]["slug"], "acme");
    assert_eq!(content["data"]["owner"], owner.id.as_str());
    let community = content["data"]["id"].as_str().unwrap().to_string();

    let response = server.get("/v1/community").await.unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["meta"]["total"], 1);
    assert_eq!(content["data"][0]["owner"]["id"], owner.id.as_str());

    let response = server
        .get_auth("/v1/community/me/owner", &owner.token)
        .await
        .unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["data"][0]["id"], community.as_str());

    let response = server
        .get(&format!("/v1/community/{community}/members"))
        .await
        .unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["meta"]["total"], 1);
    assert_eq!(content["data"][0]["role"]["name"], ADMIN);
}

#[tokio::test]
async fn test_duplicate_slug_rejected() {
    let server = TestServer::start().await.unwrap();
    let owner = signup(&server).await;
    create_community(&server, &owner, "Rocket Club").await;

    let response = server
        .post_auth("/v1/community", &owner.token, &NameRequest::new("rocket  club!"))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error["code"], "RESOURCE_EXISTS");
}

#[tokio::test]
async fn test_rename_community() {
    let server = TestServer::start().await.unwrap();
    let owner = signup(&server).await;
    let other = signup(&server).await;
    let community = create_community(&server, &owner, "Acme").await;

    let path = format!("/v1/community/{community}");
    let response = server
        .patch_auth(&path, &other.token, &NameRequest::new("Taken Over"))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error["code"], "NOT_ALLOWED_ACCESS");

    let response = server
        .patch_auth(&path, &owner.token, &NameRequest::new("Acme Labs"))
        .await
        .unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["data"]["slug"], "acme-labs");
}

// ============================================================================
// Members
// ============================================================================

#[tokio::test]
async fn test_add_member_then_duplicate() {
    let server = TestServer::start().await.unwrap();
    let admin = signup(&server).await;
    let joiner = signup(&server).await;
    let community = create_community(&server, &admin, "Acme").await;

    let response = add_member(&server, &admin, &community, &joiner, MEMBER).await;
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["data"]["user"], joiner.id.as_str());
    assert_eq!(content["data"]["community"], community.as_str());

    let response = add_member(&server, &admin, &community, &joiner, MEMBER).await;
    let error = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error["code"], "RESOURCE_EXISTS");
    assert_eq!(error["message"], "User is already added in the community.");

    let response = server
        .get_auth("/v1/community/me/member", &joiner.token)
        .await
        .unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["meta"]["total"], 1);
}

#[tokio::test]
async fn test_member_cannot_add() {
    let server = TestServer::start().await.unwrap();
    let admin = signup(&server).await;
    let member = signup(&server).await;
    let outsider = signup(&server).await;
    let community = create_community(&server, &admin, "Acme").await;
    add_member(&server, &admin, &community, &member, MEMBER).await;

    let response = add_member(&server, &member, &community, &outsider, MEMBER).await;
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error["code"], "NOT_ALLOWED_ACCESS");
}

#[tokio::test]
async fn test_add_member_unknown_references() {
    let server = TestServer::start().await.unwrap();
    let admin = signup(&server).await;
    let joiner = signup(&server).await;
    let community = create_community(&server, &admin, "Acme").await;
    let role = role_id(&server, MEMBER).await;

    let cases = [
        (AddMemberRequest::new("1", &joiner.id, &role), "community"),
        (AddMemberRequest::new(&community, "1", &role), "user"),
        (AddMemberRequest::new(&community, &joiner.id, "1"), "role"),
    ];
    for (request, param) in cases {
        let response = server
            .post_auth("/v1/member", &admin.token, &request)
            .await
            .unwrap();
        let error = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
        assert_eq!(error["param"], param);
        assert_eq!(error["code"], "RESOURCE_NOT_FOUND");
    }
}

#[tokio::test]
async fn test_moderator_cannot_remove_admin() {
    let server = TestServer::start().await.unwrap();
    let admin = signup(&server).await;
    let moderator = signup(&server).await;
    let plain = signup(&server).await;
    let community = create_community(&server, &admin, "Acme").await;
    add_member(&server, &admin, &community, &moderator, MODERATOR).await;
    add_member(&server, &admin, &community, &plain, MEMBER).await;

    let admin_member = member_id(&server, &community, &admin).await;
    let response = server
        .delete_auth(&format!("/v1/member/{admin_member}"), &moderator.token)
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error["code"], "NOT_ALLOWED_ACCESS");

    let plain_member = member_id(&server, &community, &plain).await;
    let response = server
        .delete_auth(&format!("/v1/member/{plain_member}"), &moderator.token)
        .await
        .unwrap();
    let content = assert_content(response, StatusCode::OK).await.unwrap();
    assert_eq!(content["data"]["id"], plain_member.as_str());
    assert_eq!(content["data"]["message"], "Member removed successfully");

    let response = server
        .delete_auth(&format!("/v1/member/{plain_member}"), &admin.token)
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_adds_over_http() {
    let server = TestServer::start().await.unwrap();
    let admin = signup(&server).await;
    let joiner = signup(&server).await;
    let community = create_community(&server, &admin, "Acme").await;
    let role = role_id(&server, MEMBER).await;
    let request = AddMemberRequest::new(&community, &joiner.id, &role);

    let responses = tokio::join!(
        server.post_auth("/v1/member", &admin.token, &request),
        server.post_auth("/v1/member", &admin.token, &request),
        server.post_auth("/v1/member", &admin.token, &request),
        server.post_auth("/v1/member", &admin.token, &request),
    );
    let statuses = [
        responses.0.unwrap().status(),
        responses.1.unwrap().status(),
        responses.2.unwrap().status(),
        responses.3.unwrap().status(),
    ];
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(),
        3
    );
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn test_rate_limit_rejects_bursts() {
    let config = config_with(&[("RATE_LIMIT_PER_SECOND", "1"), ("RATE_LIMIT_BURST", "2")]).unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();

    let mut limited = 0;
    for _ in 0..6 {
        let response = server.get("/v1/role").await.unwrap();
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            limited += 1;
        }
    }
    assert!(limited > 0);

    // Health probes bypass the limiter
    let response = server.get("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
