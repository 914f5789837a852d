use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::core::error::{AppError, Result};
use crate::features::courses::models::{Course, CourseLevel};
use crate::shared::constants::DEFAULT_COURSE_LANGUAGE;
use crate::shared::types::{default_page, default_page_size, double_option, page_limit, page_offset};
use crate::shared::validation::{slugify, validate_money, SLUG_REGEX};

fn default_language() -> String {
    DEFAULT_COURSE_LANGUAGE.to_string()
}

/// Price must be non-negative and a discount, when present, strictly lower.
pub fn check_pricing(price: &Decimal, discount_price: Option<&Decimal>) -> std::result::Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("price_negative")
            .with_message("Price must not be negative".into()));
    }

    if let Some(discount) = discount_price {
        if *discount < Decimal::ZERO {
            return Err(ValidationError::new("discount_negative")
                .with_message("Discount price must not be negative".into()));
        }
        if discount >= price {
            return Err(ValidationError::new("discount_not_below_price")
                .with_message("Discount price must be lower than price".into()));
        }
    }

    Ok(())
}

fn validate_create_pricing(dto: &CreateCourseDto) -> std::result::Result<(), ValidationError> {
    check_pricing(&dto.price, dto.discount_price.as_ref())
}

/// Only checkable here when the request carries the price; otherwise the
/// table constraint compares against the stored price.
fn validate_update_pricing(dto: &UpdateCourseDto) -> std::result::Result<(), ValidationError> {
    if let Some(Some(discount)) = &dto.discount_price {
        validate_money(discount)?;
    }

    match (&dto.price, &dto.discount_price) {
        (Some(price), Some(discount)) => check_pricing(price, discount.as_ref()),
        (Some(price), None) => check_pricing(price, None),
        (None, Some(Some(discount))) if *discount < Decimal::ZERO => {
            Err(ValidationError::new("discount_negative")
                .with_message("Discount price must not be negative".into()))
        }
        _ => Ok(()),
    }
}

/// Request DTO for creating a course
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_pricing"))]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// URL slug; derived from the title when omitted
    #[validate(
        length(min = 1, max = 50, message = "Slug must be 1-50 characters"),
        regex(
            path = *SLUG_REGEX,
            message = "Slug may only contain letters, digits, hyphens and underscores"
        )
    )]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(
        min = 1,
        max = 500,
        message = "Short description must be 1-500 characters"
    ))]
    pub short_description: String,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String, example = "2990.00")]
    pub price: Decimal,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<String>, example = "1990.00")]
    pub discount_price: Option<Decimal>,

    pub author_id: Uuid,

    pub category_id: Option<Uuid>,

    #[serde(default)]
    pub level: CourseLevel,

    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration_hours: i32,

    #[serde(default = "default_language")]
    #[validate(length(min = 1, max = 50, message = "Language must be 1-50 characters"))]
    pub language: String,

    #[validate(length(max = 255, message = "Cover image reference must not exceed 255 characters"))]
    pub cover_image: Option<String>,

    #[validate(length(max = 255, message = "Preview video reference must not exceed 255 characters"))]
    pub preview_video: Option<String>,

    #[serde(default)]
    pub is_published: bool,

    #[serde(default)]
    pub is_featured: bool,
}

impl CreateCourseDto {
    /// The explicit slug, or one derived from the title
    pub fn resolved_slug(&self) -> Result<String> {
        match &self.slug {
            Some(slug) => Ok(slug.clone()),
            None => slugify(&self.title).ok_or_else(|| {
                AppError::Validation(
                    "Slug cannot be derived from the title; provide one explicitly".to_string(),
                )
            }),
        }
    }
}

/// Request DTO for updating a course.
///
/// Omitted fields are left unchanged. `discount_price` and `category_id`
/// accept an explicit `null` to clear them; an empty media reference clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_pricing"))]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 50, message = "Slug must be 1-50 characters"),
        regex(
            path = *SLUG_REGEX,
            message = "Slug may only contain letters, digits, hyphens and underscores"
        )
    )]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,

    #[validate(length(
        min = 1,
        max = 500,
        message = "Short description must be 1-500 characters"
    ))]
    pub short_description: Option<String>,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<String>, example = "2990.00")]
    pub price: Option<Decimal>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, example = "1990.00")]
    pub discount_price: Option<Option<Decimal>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,

    pub level: Option<CourseLevel>,

    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration_hours: Option<i32>,

    #[validate(length(min = 1, max = 50, message = "Language must be 1-50 characters"))]
    pub language: Option<String>,

    #[validate(length(max = 255, message = "Cover image reference must not exceed 255 characters"))]
    pub cover_image: Option<String>,

    #[validate(length(max = 255, message = "Preview video reference must not exceed 255 characters"))]
    pub preview_video: Option<String>,

    pub is_published: Option<bool>,

    pub is_featured: Option<bool>,
}

/// Request DTO for recording one review score
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecordReviewDto {
    /// Whole-star score from 1 to 5
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    pub score: i32,
}

// Sort direction
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort fields for course listings
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CourseSortBy {
    #[default]
    CreatedAt,
    Price,
    Rating,
    StudentsCount,
}

impl CourseSortBy {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CourseSortBy::CreatedAt => "c.created_at",
            CourseSortBy::Price => "c.price",
            CourseSortBy::Rating => "c.rating",
            CourseSortBy::StudentsCount => "c.students_count",
        }
    }
}

/// Query params for listing courses
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CourseQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Case-insensitive search in title and short description
    pub search: Option<String>,

    /// Category slug
    pub category: Option<String>,

    pub author_id: Option<Uuid>,

    #[param(inline)]
    pub level: Option<CourseLevel>,

    pub is_published: Option<bool>,

    pub is_featured: Option<bool>,

    /// Sort field (default: created_at)
    #[serde(default)]
    #[param(inline)]
    pub sort_by: CourseSortBy,

    /// Sort direction (default: desc, i.e. newest first)
    #[serde(default)]
    #[param(inline)]
    pub sort: SortDirection,
}

impl Default for CourseQueryParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: None,
            category: None,
            author_id: None,
            level: None,
            is_published: None,
            is_featured: None,
            sort_by: CourseSortBy::default(),
            sort: SortDirection::default(),
        }
    }
}

impl CourseQueryParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }

    pub fn limit(&self) -> i64 {
        page_limit(self.page_size)
    }
}

/// Response DTO for course
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponseDto {
    pub id: Uuid,
    pub display_name: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    #[schema(value_type = String, example = "2990.00")]
    pub price: Decimal,
    #[schema(value_type = Option<String>)]
    pub discount_price: Option<Decimal>,
    /// Discount price when set, otherwise price
    #[schema(value_type = String)]
    pub effective_price: Decimal,
    pub author_id: Uuid,
    pub author_name: String,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub level: CourseLevel,
    pub duration_hours: i32,
    pub language: String,
    pub cover_image: Option<String>,
    pub preview_video: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub students_count: i32,
    pub rating: f64,
    pub reviews_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponseDto {
    fn from(c: Course) -> Self {
        Self {
            display_name: c.to_string(),
            effective_price: c.effective_price(),
            author_name: c.author_name(),
            id: c.id,
            title: c.title,
            slug: c.slug,
            description: c.description,
            short_description: c.short_description,
            price: c.price,
            discount_price: c.discount_price,
            author_id: c.author_id,
            category_id: c.category_id,
            category_name: c.category_name,
            category_slug: c.category_slug,
            level: c.level,
            duration_hours: c.duration_hours,
            language: c.language,
            cover_image: c.cover_image,
            preview_video: c.preview_video,
            is_published: c.is_published,
            is_featured: c.is_featured,
            students_count: c.students_count,
            rating: c.rating,
            reviews_count: c.reviews_count,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Result of deleting a course
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteCourseResponseDto {
    pub id: Uuid,
    pub slug: String,
}

/// Derived statistics of a course
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseStatsDto {
    pub id: Uuid,
    pub slug: String,
    pub students_count: i32,
    pub rating: f64,
    pub reviews_count: i32,
}
