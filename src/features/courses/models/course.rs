use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::authors::models::author_label;

/// Course difficulty, matching the `course_level` database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "course_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseLevel::Beginner => write!(f, "beginner"),
            CourseLevel::Intermediate => write!(f, "intermediate"),
            CourseLevel::Advanced => write!(f, "advanced"),
        }
    }
}

/// Database model for course, joined with its author's user and its category
#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
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
    pub author_username: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
}

impl Course {
    /// Price a buyer pays: the discount price when one is set
    pub fn effective_price(&self) -> Decimal {
        self.discount_price.unwrap_or(self.price)
    }

    pub fn author_name(&self) -> String {
        author_label(
            &self.author_first_name,
            &self.author_last_name,
            &self.author_username,
        )
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn course() -> Course {
        let now = Utc::now();
        Course {
            id: Uuid::new_v4(),
            title: "React Native from zero to PRO".to_string(),
            slug: "react-native-pro".to_string(),
            description: "Full course".to_string(),
            short_description: "Build mobile apps".to_string(),
            price: Decimal::from(2990),
            discount_price: None,
            author_id: Uuid::new_v4(),
            category_id: None,
            level: CourseLevel::default(),
            duration_hours: 24,
            language: "English".to_string(),
            cover_image: None,
            preview_video: None,
            is_published: false,
            is_featured: false,
            students_count: 0,
            rating: 0.0,
            reviews_count: 0,
            created_at: now,
            updated_at: now,
            author_username: "ivan".to_string(),
            author_first_name: "Ivan".to_string(),
            author_last_name: "Ivanov".to_string(),
            category_name: None,
            category_slug: None,
        }
    }

    #[test]
    fn test_level_defaults_to_beginner() {
        assert_eq!(CourseLevel::default(), CourseLevel::Beginner);
    }

    #[test]
    fn test_level_serde_accepts_only_known_values() {
        let level: CourseLevel = serde_json::from_str("\"intermediate\"").unwrap();
        assert_eq!(level, CourseLevel::Intermediate);
        assert_eq!(serde_json::to_string(&CourseLevel::Advanced).unwrap(), "\"advanced\"");

        assert!(serde_json::from_str::<CourseLevel>("\"expert\"").is_err());
        assert!(serde_json::from_str::<CourseLevel>("\"Beginner\"").is_err());
    }

    #[test]
    fn test_level_display_matches_database_labels() {
        assert_eq!(CourseLevel::Beginner.to_string(), "beginner");
        assert_eq!(CourseLevel::Intermediate.to_string(), "intermediate");
        assert_eq!(CourseLevel::Advanced.to_string(), "advanced");
    }

    #[test]
    fn test_effective_price() {
        let mut c = course();
        assert_eq!(c.effective_price(), Decimal::from(2990));

        c.discount_price = Some(Decimal::new(199050, 2));
        assert_eq!(c.effective_price(), Decimal::new(199050, 2));
    }

    #[test]
    fn test_labels() {
        let mut c = course();
        assert_eq!(c.to_string(), "React Native from zero to PRO");
        assert_eq!(c.author_name(), "Ivan Ivanov");

        c.author_first_name.clear();
        c.author_last_name.clear();
        assert_eq!(c.author_name(), "ivan");
    }
}
