use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Complaint status enum matching database enum.
///
/// `Closed` is a legacy value from an earlier schema revision; historical
/// rows may still carry it, but no operation writes it and no transition
/// reaches it. The live lifecycle is `Opened -> Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "complaint_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    Opened,
    Resolved,
    Closed,
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplaintStatus::Opened => write!(f, "opened"),
            ComplaintStatus::Resolved => write!(f, "resolved"),
            ComplaintStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Complaint category enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "complaint_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ComplaintCategory {
    General,
    Plumbing,
    Electrical,
    Furniture,
}

impl std::fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplaintCategory::General => write!(f, "general"),
            ComplaintCategory::Plumbing => write!(f, "plumbing"),
            ComplaintCategory::Electrical => write!(f, "electrical"),
            ComplaintCategory::Furniture => write!(f, "furniture"),
        }
    }
}

/// Database model for a complaint
#[derive(Debug, Clone, FromRow)]
pub struct Complaint {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub category: Option<ComplaintCategory>,
    pub status: ComplaintStatus,
}

/// Attribution record, one per complaint: who filed it and, once resolved,
/// who resolved it. Created in the same transaction as its complaint;
/// `resolved_by`/`resolved_at` are written exactly once.
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintLog {
    pub complaint_id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Row shape of the complaint/attribution/creator three-way join
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintWithCreator {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub category: Option<ComplaintCategory>,
    pub status: ComplaintStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub creator_name: String,
    pub creator_level: Option<i32>,
}
