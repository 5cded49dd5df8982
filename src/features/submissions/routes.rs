use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::submissions::handlers::form_handler::{show_form, submit_form};
use crate::features::submissions::handlers::submission_handler::submit_entry;
use crate::features::submissions::handlers::SubmissionState;

/// Create routes for the submissions feature
pub fn routes(state: SubmissionState, max_body_size: usize) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/api/submissions", post(submit_entry))
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DriveConfig, SheetConfig};
    use crate::features::submissions::dtos::MAX_SCREENSHOT_SIZE;
    use crate::features::submissions::services::SubmissionService;
    use crate::modules::google::{test_support, DriveClient, SheetsClient};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use minijinja::Environment;
    use std::sync::Arc;

    fn test_state() -> SubmissionState {
        let auth = test_support::test_token_manager();
        let drive = Arc::new(DriveClient::new(
            DriveConfig {
                folder_id: "test-folder".to_string(),
            },
            Arc::clone(&auth),
        ));
        let sheets = Arc::new(SheetsClient::new(
            SheetConfig {
                spreadsheet_id: "test-spreadsheet".to_string(),
                sheet_name: "Form Entries".to_string(),
            },
            auth,
        ));

        let mut templates = Environment::new();
        templates
            .add_template("form.jinja", include_str!("../../../templates/form.jinja"))
            .unwrap();

        SubmissionState {
            submission_service: Arc::new(SubmissionService::new(drive, sheets)),
            templates: Arc::new(templates),
        }
    }

    fn test_server() -> TestServer {
        // Body limit above the per-file cap so field-level checks are exercised
        TestServer::new(routes(test_state(), MAX_SCREENSHOT_SIZE + 2 * 1024 * 1024)).unwrap()
    }

    /// Hand-rolled multipart body: one part per (name, value) pair
    fn multipart_body(fields: &[(&str, &str)]) -> (String, Vec<u8>) {
        let boundary = "test-boundary-7381";
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));
        (
            format!("multipart/form-data; boundary={boundary}"),
            body.into_bytes(),
        )
    }

    #[tokio::test]
    async fn test_form_page_renders_all_inputs() {
        let server = test_server();
        let response = server.get("/").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let page = response.text();
        assert!(page.contains("Auditor Error Logger"));
        assert!(page.contains("name=\"auditor\""));
        assert!(page.contains("name=\"file_no\""));
        assert!(page.contains("name=\"error_description\""));
        assert!(page.contains("name=\"screenshot\""));
    }

    #[tokio::test]
    async fn test_api_rejects_missing_required_fields() {
        let server = test_server();
        let (content_type, body) = multipart_body(&[("auditor", "Jane"), ("file_no", "F1")]);

        let response = server
            .post("/api/submissions")
            .content_type(&content_type)
            .bytes(body.into())
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let page = response.text();
        assert!(page.contains("Error Description"));
    }

    #[tokio::test]
    async fn test_browser_submit_shows_warning_for_incomplete_form() {
        let server = test_server();
        let (content_type, body) =
            multipart_body(&[("auditor", ""), ("file_no", "F1"), ("error_description", "")]);

        let response = server.post("/").content_type(&content_type).bytes(body.into()).await;

        // The page flow keeps the user on the form with a warning banner
        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response
            .text()
            .contains("Please fill in all required fields"));
    }

    #[tokio::test]
    async fn test_browser_submit_rejects_oversized_screenshot_with_error_banner() {
        let server = test_server();

        // A fake screenshot part larger than the per-file limit
        let boundary = "test-boundary-7381";
        let mut body = String::new();
        for (name, value) in [("auditor", "Jane"), ("file_no", "F1"), ("error_description", "d")] {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"screenshot\"; filename=\"big.png\"\r\nContent-Type: image/png\r\n\r\n"
        ));
        let mut bytes = body.into_bytes();
        bytes.extend(std::iter::repeat_n(0u8, MAX_SCREENSHOT_SIZE + 1));
        bytes.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let response = server
            .post("/")
            .content_type(&format!("multipart/form-data; boundary={boundary}"))
            .bytes(bytes.into())
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.text().contains("Screenshot too large"));
    }
}
