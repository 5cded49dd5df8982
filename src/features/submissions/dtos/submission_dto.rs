use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Warning shown when a required field is empty at submit time
pub const REQUIRED_FIELDS_WARNING: &str =
    "Please fill in all required fields: Auditor Name, File No, and Error Description.";

/// Text fields of a form submission. All three are required; a row is
/// appended only when every one of them is non-empty.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmissionFormDto {
    #[validate(length(min = 1, message = "Auditor Name is required"))]
    pub auditor: String,

    #[validate(length(min = 1, message = "File No is required"))]
    pub file_no: String,

    #[validate(length(min = 1, message = "Error Description is required"))]
    pub error_description: String,
}

/// Submission request shape for OpenAPI documentation.
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SubmissionRequestDto {
    /// Auditor name (required)
    #[schema(example = "Jane Roe")]
    pub auditor: String,
    /// File number the error was found in (required)
    #[schema(example = "F-1042")]
    pub file_no: String,
    /// Description of the error (required)
    pub error_description: String,
    /// Optional screenshot (jpg/jpeg/png)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub screenshot: Option<String>,
}

/// Response DTO for a logged submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponseDto {
    /// Row timestamp, minute precision (dd-mm-yyyy HH:MM)
    pub recorded_at: String,
    pub auditor: String,
    pub file_no: String,
    pub error_description: String,
    /// Drive viewer URL, or empty when no screenshot was stored
    pub screenshot_link: String,
    /// Set when the screenshot failed to process; the row was still appended
    pub screenshot_warning: Option<String>,
}

/// Allowed MIME types for screenshot uploads
pub const ALLOWED_SCREENSHOT_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Maximum screenshot size in bytes (10MB)
pub const MAX_SCREENSHOT_SIZE: usize = 10 * 1024 * 1024;

/// Check if a MIME type is allowed for screenshots
pub fn is_screenshot_type_allowed(content_type: &str) -> bool {
    ALLOWED_SCREENSHOT_MIME_TYPES.contains(&content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(auditor: &str, file_no: &str, error_description: &str) -> SubmissionFormDto {
        SubmissionFormDto {
            auditor: auditor.to_string(),
            file_no: file_no.to_string(),
            error_description: error_description.to_string(),
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert!(form("A", "F1", "desc").validate().is_ok());
    }

    #[test]
    fn test_any_empty_required_field_is_rejected() {
        assert!(form("", "F1", "desc").validate().is_err());
        assert!(form("A", "", "desc").validate().is_err());
        assert!(form("A", "F1", "").validate().is_err());
    }

    #[test]
    fn test_screenshot_mime_allowlist() {
        assert!(is_screenshot_type_allowed("image/jpeg"));
        assert!(is_screenshot_type_allowed("image/png"));
        assert!(!is_screenshot_type_allowed("image/gif"));
        assert!(!is_screenshot_type_allowed("application/pdf"));
    }
}
