use utoipa::{Modify, OpenApi};

use crate::features::submissions::{dtos as submissions_dtos, handlers as submissions_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Submissions
        submissions_handlers::submission_handler::submit_entry,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Submissions
            submissions_dtos::SubmissionRequestDto,
            submissions_dtos::SubmissionResponseDto,
            ApiResponse<submissions_dtos::SubmissionResponseDto>,
        )
    ),
    tags(
        (name = "submissions", description = "Auditor error log entries (one appended sheet row per submission)"),
    ),
    info(
        title = "Auditor Error Logger API",
        version = "0.1.0",
        description = "Collects auditor error reports, normalizes screenshots, and appends rows to the shared log sheet",
    )
)]
pub struct ApiDoc;

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
