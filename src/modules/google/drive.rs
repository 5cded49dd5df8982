//! Google Drive upload client
//!
//! Uploads normalized screenshots into the configured folder via the
//! Drive v3 `files.create` multipart upload and returns the opaque
//! file id for viewer-link construction.

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::config::DriveConfig;
use crate::core::error::AppError;
use crate::modules::google::GoogleTokenManager;

const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";

/// Minimal `files.create` response (`fields=id`)
#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

pub struct DriveClient {
    config: DriveConfig,
    auth: Arc<GoogleTokenManager>,
    client: reqwest::Client,
    upload_url: String,
}

impl DriveClient {
    pub fn new(config: DriveConfig, auth: Arc<GoogleTokenManager>) -> Self {
        Self {
            config,
            auth,
            client: reqwest::Client::new(),
            upload_url: UPLOAD_URL.to_string(),
        }
    }

    /// Upload a file into the configured folder.
    ///
    /// # Arguments
    /// * `filename` - Display name in Drive
    /// * `data` - The file content as bytes
    /// * `content_type` - The MIME type of the file
    ///
    /// # Returns
    /// The opaque Drive file id
    pub async fn upload(
        &self,
        filename: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let token = self
            .auth
            .get_access_token()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let metadata = json!({
            "name": filename,
            "parents": [self.config.folder_id],
        })
        .to_string();

        let boundary = format!("auditlog-{}", Uuid::now_v7().simple());
        let body = multipart_related_body(&boundary, &metadata, &data, content_type);

        let url = format!("{}?uploadType=multipart&fields=id", self.upload_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&token.access_token)
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Drive upload request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Drive upload failed: HTTP {} - {}",
                status, body
            )));
        }

        let file: DriveFile = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Bad Drive upload response: {}", e))
        })?;

        debug!("Uploaded '{}' to Drive as file id {}", filename, file.id);
        Ok(file.id)
    }
}

/// Shareable viewer URL for an uploaded file
pub fn view_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view?usp=sharing", file_id)
}

/// Assemble a `multipart/related` body: JSON metadata part followed by
/// the media part. reqwest only builds `multipart/form-data`, so the
/// Drive upload body is assembled by hand.
fn multipart_related_body(
    boundary: &str,
    metadata_json: &str,
    media: &[u8],
    media_type: &str,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(media.len() + metadata_json.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata_json}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("--{boundary}\r\nContent-Type: {media_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(media);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_url_matches_drive_viewer_pattern() {
        assert_eq!(
            view_url("abc123"),
            "https://drive.google.com/file/d/abc123/view?usp=sharing"
        );
    }

    #[test]
    fn test_multipart_related_body_layout() {
        let body = multipart_related_body("b-1", r#"{"name":"x.jpg"}"#, &[1, 2, 3], "image/jpeg");
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with("--b-1\r\nContent-Type: application/json; charset=UTF-8"));
        assert!(text.contains(r#"{"name":"x.jpg"}"#));
        assert!(text.contains("--b-1\r\nContent-Type: image/jpeg\r\n\r\n"));
        assert!(text.ends_with("\r\n--b-1--\r\n"));
        // Media bytes are embedded verbatim
        assert!(body.windows(3).any(|w| w == [1, 2, 3]));
    }
}
