use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Database model for author, joined with the owning user's name fields
#[derive(Debug, Clone, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub specialization: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Label for an author: the user's full name, or the username when the user
/// has no name on file.
pub fn author_label(first_name: &str, last_name: &str, username: &str) -> String {
    let full_name = format!("{} {}", first_name, last_name);
    let full_name = full_name.trim();
    if full_name.is_empty() {
        username.to_string()
    } else {
        full_name.to_string()
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            author_label(&self.first_name, &self.last_name, &self.username)
        )
    }
}
