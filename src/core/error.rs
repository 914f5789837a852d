use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

// PostgreSQL SQLSTATE codes surfaced as client errors
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Translate integrity violations raised by Postgres into client-facing errors.
    ///
    /// Anything that is not a unique, foreign key or check violation stays a
    /// `Database` error and is reported as a 500.
    pub fn from_db(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            let constraint = db_err.constraint().unwrap_or_default();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return AppError::Conflict(unique_violation_message(constraint));
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return AppError::BadRequest(foreign_key_message(constraint));
                }
                Some(CHECK_VIOLATION) => {
                    return AppError::Validation(check_violation_message(constraint));
                }
                _ => {}
            }
        }

        tracing::error!("Unmapped database error: {:?}", e);
        AppError::Database(e)
    }
}

fn unique_violation_message(constraint: &str) -> String {
    match constraint {
        "authors_user_id_key" => "An author profile already exists for this user",
        "categories_slug_key" => "A category with this slug already exists",
        "courses_slug_key" => "A course with this slug already exists",
        _ => "A record with the same unique value already exists",
    }
    .to_string()
}

fn foreign_key_message(constraint: &str) -> String {
    match constraint {
        "authors_user_id_fkey" => "User does not exist",
        "courses_author_id_fkey" => "Author does not exist",
        "courses_category_id_fkey" => "Category does not exist",
        _ => "Referenced record does not exist",
    }
    .to_string()
}

fn check_violation_message(constraint: &str) -> String {
    match constraint {
        "courses_price_non_negative" => "Price must not be negative",
        "courses_discount_below_price" => {
            "Discount price must be non-negative and lower than price"
        }
        _ => "Value violates a table constraint",
    }
    .to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_validation_body_lists_message() {
        let response = AppError::Validation("title is too long".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "title is too long");
        assert_eq!(body["errors"][0], "title is too long");
    }

    #[test]
    fn test_non_database_sqlx_error_is_not_remapped() {
        assert!(matches!(
            AppError::from_db(sqlx::Error::RowNotFound),
            AppError::Database(_)
        ));
    }

    #[test]
    fn test_constraint_messages() {
        assert_eq!(
            unique_violation_message("courses_slug_key"),
            "A course with this slug already exists"
        );
        assert_eq!(
            unique_violation_message("authors_user_id_key"),
            "An author profile already exists for this user"
        );
        assert_eq!(
            foreign_key_message("courses_category_id_fkey"),
            "Category does not exist"
        );
        assert_eq!(
            foreign_key_message("something_else"),
            "Referenced record does not exist"
        );
        assert_eq!(
            check_violation_message("courses_price_non_negative"),
            "Price must not be negative"
        );
    }
}
