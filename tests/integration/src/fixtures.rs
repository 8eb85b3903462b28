//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Tester {suffix}"),
            email: format!("tester{suffix}@example.com"),
            password: "hunter22".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl SigninRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NameRequest {
    pub name: String,
}

impl NameRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddMemberRequest {
    pub community: String,
    pub user: String,
    pub role: String,
}

impl AddMemberRequest {
    pub fn new(community: &str, user: &str, role: &str) -> Self {
        Self {
            community: community.to_string(),
            user: user.to_string(),
            role: role.to_string(),
        }
    }
}

/// A signed-up user as seen by the client
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub token: String,
}
