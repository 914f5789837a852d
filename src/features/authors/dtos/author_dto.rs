use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::authors::models::Author;

/// Request DTO for turning an existing user into an author
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAuthorDto {
    /// User the profile belongs to (one profile per user)
    pub user_id: Uuid,

    /// Biography, may be left empty
    #[serde(default)]
    pub bio: String,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Specialization must be 1-200 characters"
    ))]
    pub specialization: String,

    /// Avatar image reference
    #[validate(length(max = 255, message = "Avatar reference must not exceed 255 characters"))]
    pub avatar: Option<String>,
}

/// Request DTO for updating an author. Omitted fields are left unchanged;
/// an empty `avatar` clears the image.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthorDto {
    pub bio: Option<String>,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Specialization must be 1-200 characters"
    ))]
    pub specialization: Option<String>,

    #[validate(length(max = 255, message = "Avatar reference must not exceed 255 characters"))]
    pub avatar: Option<String>,
}

/// Response DTO for author
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Full name of the user, or the username when no name is set
    pub display_name: String,
    pub username: String,
    pub bio: String,
    pub specialization: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Author> for AuthorResponseDto {
    fn from(a: Author) -> Self {
        Self {
            display_name: a.to_string(),
            id: a.id,
            user_id: a.user_id,
            username: a.username,
            bio: a.bio,
            specialization: a.specialization,
            avatar: a.avatar,
            created_at: a.created_at,
        }
    }
}

/// Result of deleting an author
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteAuthorResponseDto {
    pub id: Uuid,
    /// Courses removed along with the author
    pub courses_deleted: u64,
}
