use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a resident or hall administrator.
///
/// Credential issuance (registration, login, password reset) lives in a
/// separate service; this backend only reads user rows for identity
/// resolution and complaint attribution.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub department: Option<String>,
    pub hashed_password: String,
    pub level: Option<i32>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
