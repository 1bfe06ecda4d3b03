use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::complaints::{
    dtos as complaints_dtos, handlers as complaints_handlers, models as complaints_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Complaints
        complaints_handlers::get_all_complaints,
        complaints_handlers::get_complaint_by_id,
        complaints_handlers::create_complaint,
        complaints_handlers::resolve_complaint,
        complaints_handlers::bulk_resolve_complaints,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Complaints
            complaints_models::ComplaintStatus,
            complaints_models::ComplaintCategory,
            complaints_dtos::CreateComplaintDto,
            complaints_dtos::BulkResolveDto,
            complaints_dtos::ComplaintResponseDto,
            complaints_dtos::ResolutionResponseDto,
            ApiResponse<complaints_dtos::ComplaintResponseDto>,
            ApiResponse<Vec<complaints_dtos::ComplaintResponseDto>>,
            ApiResponse<complaints_dtos::ResolutionResponseDto>,
            ApiResponse<Vec<complaints_dtos::ResolutionResponseDto>>,
        )
    ),
    tags(
        (name = "complaints", description = "Resident complaints and their resolution workflow"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Residence API",
        version = "0.1.0",
        description = "API documentation for the residence management backend",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
