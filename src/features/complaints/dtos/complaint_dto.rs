use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::CurrentUser;
use crate::features::complaints::models::{
    Complaint, ComplaintCategory, ComplaintLog, ComplaintStatus, ComplaintWithCreator,
};

/// Request DTO for filing a complaint
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateComplaintDto {
    #[validate(length(min = 1, max = 64, message = "Title must be 1-64 characters"))]
    pub title: String,

    #[validate(length(max = 128, message = "Content must not exceed 128 characters"))]
    pub content: Option<String>,

    pub category: Option<ComplaintCategory>,
}

/// Request DTO for resolving a batch of complaints
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BulkResolveDto {
    #[validate(length(min = 1, message = "ids must not be empty"))]
    pub ids: Vec<Uuid>,
}

/// Full complaint representation: complaint joined with its attribution
/// and the creator's identity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponseDto {
    pub complaint_id: Uuid,
    pub title: String,
    pub details: Option<String>,
    pub category: Option<ComplaintCategory>,
    pub created_by: Uuid,
    pub created_by_name: String,
    pub user_level: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub status: ComplaintStatus,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<ComplaintWithCreator> for ComplaintResponseDto {
    fn from(row: ComplaintWithCreator) -> Self {
        Self {
            complaint_id: row.id,
            title: row.title,
            details: row.content,
            category: row.category,
            created_by: row.created_by,
            created_by_name: row.creator_name,
            user_level: row.creator_level,
            created_at: row.created_at,
            status: row.status,
            resolved_by: row.resolved_by,
            resolved_at: row.resolved_at,
        }
    }
}

impl ComplaintResponseDto {
    /// Assemble the response for a freshly created complaint, where the
    /// creator identity is already at hand and needs no join.
    pub fn from_parts(complaint: Complaint, log: ComplaintLog, creator: &CurrentUser) -> Self {
        Self {
            complaint_id: complaint.id,
            title: complaint.title,
            details: complaint.content,
            category: complaint.category,
            created_by: log.created_by,
            created_by_name: creator.name.clone(),
            user_level: creator.level,
            created_at: log.created_at,
            status: complaint.status,
            resolved_by: log.resolved_by,
            resolved_at: log.resolved_at,
        }
    }
}

/// Narrow per-complaint resolution result. `status` is absent for ids the
/// batch could not find; `message` carries the informational or failure
/// note for entries that did not transition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResolutionResponseDto {
    pub complaint_id: Uuid,
    pub status: Option<ComplaintStatus>,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResolutionResponseDto {
    pub fn resolved(complaint_id: Uuid, resolved_by: Uuid, resolved_at: DateTime<Utc>) -> Self {
        Self {
            complaint_id,
            status: Some(ComplaintStatus::Resolved),
            resolved_by: Some(resolved_by),
            resolved_at: Some(resolved_at),
            message: None,
        }
    }

    pub fn not_found(complaint_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            complaint_id,
            status: None,
            resolved_by: None,
            resolved_at: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn create_dto_rejects_empty_title() {
        let dto = CreateComplaintDto {
            title: String::new(),
            content: None,
            category: None,
        };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn create_dto_rejects_oversized_title() {
        let dto = CreateComplaintDto {
            title: "x".repeat(65),
            content: None,
            category: None,
        };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn create_dto_accepts_title_at_limit() {
        let dto = CreateComplaintDto {
            title: "x".repeat(64),
            content: Some("Room 202".to_string()),
            category: Some(ComplaintCategory::General),
        };

        assert!(dto.validate().is_ok());
    }

    #[test]
    fn bulk_dto_rejects_empty_id_list() {
        let dto = BulkResolveDto { ids: vec![] };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn freshly_created_complaint_is_opened_and_unresolved() {
        let creator = CurrentUser {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            level: Some(200),
            is_admin: false,
        };
        let complaint = Complaint {
            id: Uuid::new_v4(),
            title: "Broken Window".to_string(),
            content: Some("Room 202".to_string()),
            category: Some(ComplaintCategory::General),
            status: ComplaintStatus::Opened,
        };
        let log = ComplaintLog {
            complaint_id: complaint.id,
            created_by: creator.id,
            created_at: chrono::Utc::now(),
            resolved_by: None,
            resolved_at: None,
        };

        let dto = ComplaintResponseDto::from_parts(complaint.clone(), log, &creator);

        assert_eq!(dto.complaint_id, complaint.id);
        assert_eq!(dto.created_by_name, "Ada");
        assert_eq!(dto.status, ComplaintStatus::Opened);
        assert!(dto.resolved_by.is_none());
        assert!(dto.resolved_at.is_none());
    }
}
