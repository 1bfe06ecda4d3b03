use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The authenticated identity injected into request extensions by the auth
/// middleware. Carries what the complaint workflow needs to attribute and
/// gate operations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub level: Option<i32>,
    pub is_admin: bool,
}

/// Bearer token claims. Tokens are HS256-signed by the credential issuer
/// with `sub` carrying the user id and `is_admin` the capability flag;
/// both must be present for the token to be accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub is_admin: bool,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: u64,
}
