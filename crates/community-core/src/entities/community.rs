//! Community entity

use chrono::{DateTime, Utc};

use crate::value_objects::{slugify, Snowflake};

/// A community. Ownership is not stored here; it is the member row holding
/// the admin role, created together with the community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    pub id: Snowflake,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Community {
    pub fn new(id: Snowflake, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            slug: slugify(&name),
            name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the name; the slug always follows.
    pub fn rename(&mut self, name: String) {
        self.slug = slugify(&name);
        self.name = name;
        self.updated_at = Utc::now();
    }
}
