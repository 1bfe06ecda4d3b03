//! Authorization guards for the application.
//!
//! The admin capability is a boolean flag on the user identity; listing and
//! resolution operations require it, filing a complaint only requires an
//! authenticated user (extracted directly as `CurrentUser`).

use crate::core::error::AppError;
use crate::features::auth::model::CurrentUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for checking if user is an administrator.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin {
            return Err(AppError::Forbidden(
                "Administrator access required".to_string(),
            ));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{with_admin_auth, with_member_auth};
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    async fn admin_only(RequireAdmin(user): RequireAdmin) -> String {
        user.name
    }

    fn router() -> Router {
        Router::new().route("/admin-only", get(admin_only))
    }

    #[tokio::test]
    async fn admin_passes_guard() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();

        let response = server.get("/admin-only").await;
        response.assert_status_ok();
        response.assert_text("Test Admin");
    }

    #[tokio::test]
    async fn member_is_forbidden() {
        let server = TestServer::new(with_member_auth(router())).unwrap();

        let response = server.get("/admin-only").await;
        response.assert_status(axum::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unauthenticated_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();

        let response = server.get("/admin-only").await;
        response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
    }
}
