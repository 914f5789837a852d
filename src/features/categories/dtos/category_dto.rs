use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::shared::validation::{slugify, SLUG_REGEX};

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// URL slug; derived from the name when omitted
    #[validate(
        length(min = 1, max = 50, message = "Slug must be 1-50 characters"),
        regex(
            path = *SLUG_REGEX,
            message = "Slug may only contain letters, digits, hyphens and underscores"
        )
    )]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Image reference
    #[validate(length(max = 255, message = "Image reference must not exceed 255 characters"))]
    pub image: Option<String>,
}

impl CreateCategoryDto {
    /// The explicit slug, or one derived from the name
    pub fn resolved_slug(&self) -> Result<String> {
        match &self.slug {
            Some(slug) => Ok(slug.clone()),
            None => slugify(&self.name).ok_or_else(|| {
                AppError::Validation(
                    "Slug cannot be derived from the name; provide one explicitly".to_string(),
                )
            }),
        }
    }
}

/// Request DTO for updating a category. Omitted fields are left unchanged;
/// an empty `image` clears the image.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 50, message = "Slug must be 1-50 characters"),
        regex(
            path = *SLUG_REGEX,
            message = "Slug may only contain letters, digits, hyphens and underscores"
        )
    )]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 255, message = "Image reference must not exceed 255 characters"))]
    pub image: Option<String>,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub display_name: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            display_name: c.to_string(),
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            image: c.image,
            created_at: c.created_at,
        }
    }
}

/// Result of deleting a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteCategoryResponseDto {
    pub id: Uuid,
    pub slug: String,
    /// Courses that remain but no longer have a category
    pub courses_detached: u64,
}
