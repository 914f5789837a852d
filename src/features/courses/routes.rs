use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::courses::handlers;
use crate::features::courses::services::CourseService;

/// Create routes for the courses feature
pub fn routes(service: Arc<CourseService>) -> Router {
    Router::new()
        .route(
            "/api/courses",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/api/courses/{slug}",
            get(handlers::get_course)
                .put(handlers::update_course)
                .delete(handlers::delete_course),
        )
        .route("/api/courses/{slug}/reviews", post(handlers::record_review))
        .route(
            "/api/courses/{slug}/enrollments",
            post(handlers::record_enrollment),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use uuid::Uuid;

    fn server() -> TestServer {
        let service = Arc::new(CourseService::new(lazy_pool()));
        TestServer::new(routes(service)).unwrap()
    }

    fn course_json() -> serde_json::Value {
        json!({
            "title": "Python for data analysis",
            "description": "Pandas, NumPy and plotting",
            "short_description": "Analyse data with Python",
            "price": "4990.00",
            "author_id": Uuid::new_v4(),
            "duration_hours": 30
        })
    }

    #[tokio::test]
    async fn test_create_course_rejects_unknown_level() {
        let mut body = course_json();
        body["level"] = json!("expert");

        let response = server().post("/api/courses").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON data"));
    }

    #[tokio::test]
    async fn test_create_course_rejects_discount_not_below_price() {
        let mut body = course_json();
        body["discount_price"] = json!("5990.00");

        let response = server().post("/api/courses").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Discount price must be lower than price"));
    }

    #[tokio::test]
    async fn test_create_course_rejects_bad_slug() {
        let mut body = course_json();
        body["slug"] = json!("python data");

        let response = server().post("/api/courses").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_courses_rejects_unknown_level_filter() {
        let response = server().get("/api/courses?level=expert").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query parameters"));
    }

    #[tokio::test]
    async fn test_list_courses_rejects_unknown_sort_field() {
        let response = server().get("/api/courses?sort_by=title").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_review_score_out_of_range() {
        let response = server()
            .post("/api/courses/python/reviews")
            .json(&json!({ "score": 6 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Score must be between 1 and 5"));
    }

    #[tokio::test]
    async fn test_enrollment_is_post_only() {
        let response = server().get("/api/courses/python/enrollments").await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
