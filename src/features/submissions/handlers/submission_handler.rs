use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use minijinja::Environment;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::submissions::dtos::{
    is_screenshot_type_allowed, SubmissionFormDto, SubmissionRequestDto, SubmissionResponseDto,
    ALLOWED_SCREENSHOT_MIME_TYPES, MAX_SCREENSHOT_SIZE,
};
use crate::features::submissions::services::{ScreenshotUpload, SubmissionService};
use crate::shared::constants::ROW_TIMESTAMP_FORMAT;
use crate::shared::types::ApiResponse;

/// State for submission handlers
#[derive(Clone)]
pub struct SubmissionState {
    pub submission_service: Arc<SubmissionService>,
    pub templates: Arc<Environment<'static>>,
}

/// Pull the submission fields out of a multipart form.
///
/// Text fields default to empty strings (validation decides what is
/// acceptable); an empty file part counts as "no screenshot".
pub(super) async fn extract_submission(
    multipart: &mut Multipart,
) -> Result<(SubmissionFormDto, Option<ScreenshotUpload>), AppError> {
    let mut auditor = String::new();
    let mut file_no = String::new();
    let mut error_description = String::new();
    let mut screenshot: Option<ScreenshotUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "auditor" => {
                auditor = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read auditor field: {}", e))
                })?;
            }
            "file_no" => {
                file_no = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file_no field: {}", e))
                })?;
            }
            "error_description" => {
                error_description = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read error_description field: {}", e))
                })?;
            }
            "screenshot" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read screenshot bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read screenshot data: {}", e))
                })?;

                // Browsers send an empty file part when no file is picked
                if data.is_empty() {
                    continue;
                }

                if data.len() > MAX_SCREENSHOT_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "Screenshot too large. Maximum size is {} bytes ({} MB)",
                        MAX_SCREENSHOT_SIZE,
                        MAX_SCREENSHOT_SIZE / 1024 / 1024
                    )));
                }

                if !is_screenshot_type_allowed(&content_type) {
                    return Err(AppError::BadRequest(format!(
                        "Screenshot type '{}' is not allowed. Allowed types: {}",
                        content_type,
                        ALLOWED_SCREENSHOT_MIME_TYPES.join(", ")
                    )));
                }

                screenshot = Some(ScreenshotUpload {
                    data: data.to_vec(),
                    file_name,
                    content_type,
                });
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    Ok((
        SubmissionFormDto {
            auditor,
            file_no,
            error_description,
        },
        screenshot,
    ))
}

/// Log one auditor error entry
///
/// Accepts multipart/form-data with:
/// - `auditor`: Auditor name (required)
/// - `file_no`: File number (required)
/// - `error_description`: Description of the error (required)
/// - `screenshot`: Optional jpg/jpeg/png screenshot
#[utoipa::path(
    post,
    path = "/api/submissions",
    tag = "submissions",
    request_body(
        content = SubmissionRequestDto,
        content_type = "multipart/form-data",
        description = "Submission form with three required text fields and an optional screenshot",
    ),
    responses(
        (status = 201, description = "Entry appended to the log sheet", body = ApiResponse<SubmissionResponseDto>),
        (status = 400, description = "Missing required field or invalid screenshot upload"),
        (status = 502, description = "Spreadsheet service failure, no row appended")
    )
)]
pub async fn submit_entry(
    State(state): State<SubmissionState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionResponseDto>>), AppError> {
    let (form, screenshot) = extract_submission(&mut multipart).await?;

    // No row is appended unless every required field is non-empty
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = state.submission_service.submit(form, screenshot).await?;

    let response = SubmissionResponseDto {
        recorded_at: outcome
            .submission
            .recorded_at
            .format(ROW_TIMESTAMP_FORMAT)
            .to_string(),
        auditor: outcome.submission.auditor.clone(),
        file_no: outcome.submission.file_no.clone(),
        error_description: outcome.submission.error_description.clone(),
        screenshot_link: outcome.submission.screenshot_link.clone(),
        screenshot_warning: outcome.screenshot_warning,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(response),
            Some("Entry submitted successfully".to_string()),
            None,
        )),
    ))
}
