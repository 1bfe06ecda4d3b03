#[cfg(test)]
use crate::features::auth::model::CurrentUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn create_admin_user() -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        name: "Test Admin".to_string(),
        level: Some(400),
        is_admin: true,
    }
}

#[cfg(test)]
pub fn create_member_user() -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        name: "Test Resident".to_string(),
        level: Some(200),
        is_admin: false,
    }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
async fn inject_member_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_member_user());
    next.run(request).await
}

#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}

#[cfg(test)]
pub fn with_member_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_member_middleware))
}
