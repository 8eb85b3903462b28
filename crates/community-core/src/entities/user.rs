//! User entity - an account that can own and join communities

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User account. The password hash lives only in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Snowflake, name: String, email: String) -> Self {
        Self {
            id,
            name,
            email: normalize_email(&email),
            created_at: Utc::now(),
        }
    }
}

/// Emails are compared case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
