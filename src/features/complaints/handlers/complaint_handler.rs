use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::CurrentUser;
use crate::features::complaints::dtos::{
    BulkResolveDto, ComplaintResponseDto, CreateComplaintDto, ResolutionResponseDto,
};
use crate::features::complaints::services::ComplaintService;
use crate::shared::types::{ApiResponse, Meta};

/// List all complaints (admin only)
#[utoipa::path(
    get,
    path = "/complaint/",
    responses(
        (status = 200, description = "List of complaints with attribution", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn get_all_complaints(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints = service.list().await?;
    let total = complaints.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(complaints),
        None,
        Some(Meta { total }),
    )))
}

/// Get a complaint by ID (admin only)
#[utoipa::path(
    get,
    path = "/complaint/{id}",
    params(
        ("id" = Uuid, Path, description = "Complaint ID")
    ),
    responses(
        (status = 200, description = "Complaint found", body = ApiResponse<ComplaintResponseDto>),
        (status = 404, description = "Complaint not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn get_complaint_by_id(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

/// File a new complaint
#[utoipa::path(
    post,
    path = "/complaint/create-complaint",
    request_body = CreateComplaintDto,
    responses(
        (status = 200, description = "Complaint created", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn create_complaint(
    user: CurrentUser,
    State(service): State<Arc<ComplaintService>>,
    AppJson(dto): AppJson<CreateComplaintDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let complaint = service.create(dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

/// Resolve a complaint (admin only)
///
/// Resolving an already-resolved complaint succeeds and returns the
/// original resolution untouched.
#[utoipa::path(
    put,
    path = "/complaint/{id}/resolve",
    params(
        ("id" = Uuid, Path, description = "Complaint ID")
    ),
    responses(
        (status = 200, description = "Resolution state", body = ApiResponse<ResolutionResponseDto>),
        (status = 404, description = "Complaint not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn resolve_complaint(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ResolutionResponseDto>>> {
    let resolution = service.resolve(id, &user).await?;
    let message = resolution.message.clone();
    Ok(Json(ApiResponse::success(Some(resolution), message, None)))
}

/// Resolve a batch of complaints (admin only)
///
/// Returns one entry per requested id; unknown or non-open complaints are
/// reported in their entry without failing the batch.
#[utoipa::path(
    post,
    path = "/complaint/bulk-resolve",
    request_body = BulkResolveDto,
    responses(
        (status = 200, description = "Per-complaint resolution results", body = ApiResponse<Vec<ResolutionResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "complaints"
)]
pub async fn bulk_resolve_complaints(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    AppJson(dto): AppJson<BulkResolveDto>,
) -> Result<Json<ApiResponse<Vec<ResolutionResponseDto>>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let results = service.bulk_resolve(dto, &user).await?;
    let total = results.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(results),
        None,
        Some(Meta { total }),
    )))
}
