use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::authors::handlers;
use crate::features::authors::services::AuthorService;

/// Create routes for the authors feature
pub fn routes(service: Arc<AuthorService>) -> Router {
    Router::new()
        .route(
            "/api/authors",
            get(handlers::list_authors).post(handlers::create_author),
        )
        .route(
            "/api/authors/{id}",
            get(handlers::get_author)
                .put(handlers::update_author)
                .delete(handlers::delete_author),
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

    fn server() -> TestServer {
        let service = Arc::new(AuthorService::new(lazy_pool()));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_create_author_rejects_invalid_specialization() {
        let response = server()
            .post("/api/authors")
            .json(&json!({
                "user_id": uuid::Uuid::new_v4(),
                "specialization": "",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Specialization must be 1-200 characters"));
    }

    #[tokio::test]
    async fn test_create_author_rejects_malformed_json() {
        let response = server()
            .post("/api/authors")
            .text("{not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON syntax"));
    }

    #[tokio::test]
    async fn test_get_author_rejects_non_uuid_id() {
        let response = server().get("/api/authors/not-a-uuid").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
