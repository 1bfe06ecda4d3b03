use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::CurrentUser;
use crate::features::complaints::dtos::{
    BulkResolveDto, ComplaintResponseDto, CreateComplaintDto, ResolutionResponseDto,
};
use crate::features::complaints::models::{
    Complaint, ComplaintCategory, ComplaintLog, ComplaintStatus, ComplaintWithCreator,
};

const COMPLAINT_WITH_CREATOR_QUERY: &str = r#"
    SELECT c.id, c.title, c.content, c.category, c.status,
           l.created_by, l.created_at, l.resolved_by, l.resolved_at,
           u.name AS creator_name, u.level AS creator_level
    FROM complaints c
    JOIN complaint_logs l ON l.complaint_id = c.id
    JOIN users u ON u.id = l.created_by
"#;

/// Snapshot of a complaint's resolution state, read inside the transaction
/// that may update it.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ResolutionState {
    status: ComplaintStatus,
    resolved_by: Option<Uuid>,
    resolved_at: Option<DateTime<Utc>>,
}

/// What the workflow may do with a complaint in a given status. The live
/// transition is `Opened -> Resolved`; anything else is left untouched and
/// reported with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ResolveDecision {
    Resolve,
    Skip(&'static str),
}

fn decide(status: ComplaintStatus) -> ResolveDecision {
    match status {
        ComplaintStatus::Opened => ResolveDecision::Resolve,
        ComplaintStatus::Resolved => ResolveDecision::Skip("Complaint already resolved"),
        ComplaintStatus::Closed => ResolveDecision::Skip("Complaint is closed"),
    }
}

fn not_found_message(id: Uuid) -> String {
    format!("Complaint with id {} not found", id)
}

/// Service for the complaint lifecycle: creation, lookup, and the
/// resolution workflow. Each mutating operation runs in a single
/// transaction; an error on any statement rolls the whole operation back.
pub struct ComplaintService {
    pool: PgPool,
}

impl ComplaintService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// File a new complaint. The complaint and its attribution are inserted
    /// atomically; the response is assembled from the caller's identity.
    pub async fn create(
        &self,
        dto: CreateComplaintDto,
        creator: &CurrentUser,
    ) -> Result<ComplaintResponseDto> {
        if dto.title.is_empty() {
            return Err(AppError::Validation("Title must not be empty".to_string()));
        }

        let category = dto.category.unwrap_or(ComplaintCategory::General);

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let complaint = sqlx::query_as::<_, Complaint>(
            r#"
            INSERT INTO complaints (title, content, category)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, category, status
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(category)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create complaint: {:?}", e);
            AppError::Database(e)
        })?;

        let log = sqlx::query_as::<_, ComplaintLog>(
            r#"
            INSERT INTO complaint_logs (complaint_id, created_by)
            VALUES ($1, $2)
            RETURNING complaint_id, created_by, created_at, resolved_by, resolved_at
            "#,
        )
        .bind(complaint.id)
        .bind(creator.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create complaint attribution: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit complaint creation: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Complaint created: id={}, category={}, by={}",
            complaint.id,
            category,
            creator.id
        );

        Ok(ComplaintResponseDto::from_parts(complaint, log, creator))
    }

    /// List every complaint joined with its attribution and creator
    /// identity, in filing order.
    pub async fn list(&self) -> Result<Vec<ComplaintResponseDto>> {
        let rows = sqlx::query_as::<_, ComplaintWithCreator>(&format!(
            "{} ORDER BY l.created_at",
            COMPLAINT_WITH_CREATOR_QUERY
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list complaints: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Get a single complaint by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<ComplaintResponseDto> {
        let row = sqlx::query_as::<_, ComplaintWithCreator>(&format!(
            "{} WHERE c.id = $1",
            COMPLAINT_WITH_CREATOR_QUERY
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get complaint by id: {:?}", e);
            AppError::Database(e)
        })?;

        row.map(|r| r.into())
            .ok_or_else(|| AppError::NotFound(not_found_message(id)))
    }

    /// Resolve a single complaint. Resolving an already-resolved complaint
    /// succeeds without re-stamping: the original resolver and timestamp are
    /// returned with an informational message.
    pub async fn resolve(
        &self,
        id: Uuid,
        resolver: &CurrentUser,
    ) -> Result<ResolutionResponseDto> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let state = Self::fetch_resolution_state(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(not_found_message(id)))?;

        let entry = match decide(state.status) {
            ResolveDecision::Skip(message) => Self::skipped_entry(id, &state, message),
            ResolveDecision::Resolve => {
                let now = Utc::now();
                Self::mark_resolved(&mut tx, id, resolver.id, now).await?;
                ResolutionResponseDto::resolved(id, resolver.id, now)
            }
        };

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit complaint resolution: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(entry)
    }

    /// Resolve a batch of complaints. Ids that are unknown or not in an
    /// open state are reported per-entry without failing the batch; every
    /// actual update shares one timestamp and commits in one transaction,
    /// so an error anywhere rolls back the entire batch.
    pub async fn bulk_resolve(
        &self,
        dto: BulkResolveDto,
        resolver: &CurrentUser,
    ) -> Result<Vec<ResolutionResponseDto>> {
        if dto.ids.is_empty() {
            return Err(AppError::Validation("ids must not be empty".to_string()));
        }

        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let mut entries = Vec::with_capacity(dto.ids.len());
        let mut resolved_count = 0usize;

        for id in &dto.ids {
            match Self::fetch_resolution_state(&mut tx, *id).await? {
                None => {
                    entries.push(ResolutionResponseDto::not_found(*id, not_found_message(*id)));
                }
                Some(state) => match decide(state.status) {
                    ResolveDecision::Skip(message) => {
                        entries.push(Self::skipped_entry(*id, &state, message));
                    }
                    ResolveDecision::Resolve => {
                        Self::mark_resolved(&mut tx, *id, resolver.id, now).await?;
                        entries.push(ResolutionResponseDto::resolved(*id, resolver.id, now));
                        resolved_count += 1;
                    }
                },
            }
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit bulk resolution: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Bulk resolution: {} requested, {} resolved, by={}",
            dto.ids.len(),
            resolved_count,
            resolver.id
        );

        Ok(entries)
    }

    async fn fetch_resolution_state(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<ResolutionState>> {
        sqlx::query_as::<_, ResolutionState>(
            r#"
            SELECT c.status, l.resolved_by, l.resolved_at
            FROM complaints c
            JOIN complaint_logs l ON l.complaint_id = c.id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch resolution state: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn mark_resolved(
        conn: &mut PgConnection,
        id: Uuid,
        resolver_id: Uuid,
        resolved_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query("UPDATE complaints SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(ComplaintStatus::Resolved)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update complaint status: {:?}", e);
                AppError::Database(e)
            })?;

        sqlx::query(
            r#"
            UPDATE complaint_logs
            SET resolved_by = $2, resolved_at = $3
            WHERE complaint_id = $1 AND resolved_at IS NULL
            "#,
        )
        .bind(id)
        .bind(resolver_id)
        .bind(resolved_at)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update complaint attribution: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    fn skipped_entry(
        id: Uuid,
        state: &ResolutionState,
        message: &str,
    ) -> ResolutionResponseDto {
        ResolutionResponseDto {
            complaint_id: id,
            status: Some(state.status),
            resolved_by: state.resolved_by,
            resolved_at: state.resolved_at,
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved_state(resolver: Uuid, at: DateTime<Utc>) -> ResolutionState {
        ResolutionState {
            status: ComplaintStatus::Resolved,
            resolved_by: Some(resolver),
            resolved_at: Some(at),
        }
    }

    #[test]
    fn opened_complaints_are_resolvable() {
        assert_eq!(decide(ComplaintStatus::Opened), ResolveDecision::Resolve);
    }

    #[test]
    fn resolved_complaints_are_skipped_not_errored() {
        assert_eq!(
            decide(ComplaintStatus::Resolved),
            ResolveDecision::Skip("Complaint already resolved")
        );
    }

    #[test]
    fn legacy_closed_complaints_are_never_transitioned() {
        assert!(matches!(
            decide(ComplaintStatus::Closed),
            ResolveDecision::Skip(_)
        ));
    }

    #[test]
    fn skipped_entry_keeps_original_resolution() {
        // Re-resolving must echo the first resolver, not the caller.
        let id = Uuid::new_v4();
        let first_resolver = Uuid::new_v4();
        let first_time = Utc::now();
        let state = resolved_state(first_resolver, first_time);

        let entry = ComplaintService::skipped_entry(id, &state, "Complaint already resolved");

        assert_eq!(entry.complaint_id, id);
        assert_eq!(entry.status, Some(ComplaintStatus::Resolved));
        assert_eq!(entry.resolved_by, Some(first_resolver));
        assert_eq!(entry.resolved_at, Some(first_time));
        assert_eq!(entry.message.as_deref(), Some("Complaint already resolved"));
    }

    #[test]
    fn not_found_entry_has_no_status_or_resolution() {
        let id = Uuid::new_v4();

        let entry = ResolutionResponseDto::not_found(id, not_found_message(id));

        assert_eq!(entry.complaint_id, id);
        assert!(entry.status.is_none());
        assert!(entry.resolved_by.is_none());
        assert!(entry.resolved_at.is_none());
        assert!(entry.message.unwrap().contains("not found"));
    }

    #[test]
    fn resolved_entry_carries_batch_timestamp() {
        let id = Uuid::new_v4();
        let resolver = Uuid::new_v4();
        let now = Utc::now();

        let entry = ResolutionResponseDto::resolved(id, resolver, now);

        assert_eq!(entry.status, Some(ComplaintStatus::Resolved));
        assert_eq!(entry.resolved_by, Some(resolver));
        assert_eq!(entry.resolved_at, Some(now));
        assert!(entry.message.is_none());
    }
}
