use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::complaints::handlers;
use crate::features::complaints::services::ComplaintService;

/// Create routes for the complaints feature
///
/// Note: This feature requires authentication; listing and resolution
/// additionally require the admin capability.
pub fn routes(service: Arc<ComplaintService>) -> Router {
    Router::new()
        .route("/complaint/", get(handlers::get_all_complaints))
        .route("/complaint/{id}", get(handlers::get_complaint_by_id))
        .route(
            "/complaint/create-complaint",
            post(handlers::create_complaint),
        )
        .route("/complaint/{id}/resolve", put(handlers::resolve_complaint))
        .route(
            "/complaint/bulk-resolve",
            post(handlers::bulk_resolve_complaints),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{with_admin_auth, with_member_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    // The pool is lazy: admin-gate rejections happen in the extractor, so
    // these requests never reach the database.
    fn test_router() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/residence_test")
            .unwrap();
        routes(Arc::new(ComplaintService::new(pool)))
    }

    #[tokio::test]
    async fn listing_requires_admin() {
        let server = TestServer::new(with_member_auth(test_router())).unwrap();

        let response = server.get("/complaint/").await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn lookup_requires_admin() {
        let server = TestServer::new(with_member_auth(test_router())).unwrap();

        let response = server.get(&format!("/complaint/{}", Uuid::new_v4())).await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn resolve_requires_admin() {
        let server = TestServer::new(with_member_auth(test_router())).unwrap();

        let response = server
            .put(&format!("/complaint/{}/resolve", Uuid::new_v4()))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn bulk_resolve_requires_admin() {
        let server = TestServer::new(with_member_auth(test_router())).unwrap();

        let response = server
            .post("/complaint/bulk-resolve")
            .json(&serde_json::json!({ "ids": [Uuid::new_v4()] }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unauthenticated_requests_are_rejected() {
        let server = TestServer::new(test_router()).unwrap();

        let response = server.get("/complaint/").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn bulk_resolve_rejects_empty_id_list() {
        let server = TestServer::new(with_admin_auth(test_router())).unwrap();

        let response = server
            .post("/complaint/bulk-resolve")
            .json(&serde_json::json!({ "ids": [] }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let server = TestServer::new(with_member_auth(test_router())).unwrap();

        let response = server
            .post("/complaint/create-complaint")
            .json(&serde_json::json!({ "title": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
