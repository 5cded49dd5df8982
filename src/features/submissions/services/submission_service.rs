use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::error::{AppError, Result};
use crate::features::submissions::dtos::SubmissionFormDto;
use crate::features::submissions::models::Submission;
use crate::modules::google::{view_url, DriveClient, SheetsClient};
use crate::modules::image;
use crate::shared::constants::FILENAME_DATE_FORMAT;

/// A screenshot file as received from the form
#[derive(Debug, Clone)]
pub struct ScreenshotUpload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Result of one handled submission. The row append either happened or
/// the whole call failed; a screenshot problem only leaves a warning.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub submission: Submission,
    pub screenshot_warning: Option<String>,
}

/// Service for logging auditor error submissions
pub struct SubmissionService {
    drive: Arc<DriveClient>,
    sheets: Arc<SheetsClient>,
}

impl SubmissionService {
    pub fn new(drive: Arc<DriveClient>, sheets: Arc<SheetsClient>) -> Self {
        Self { drive, sheets }
    }

    /// Handle one validated submission: normalize and upload the
    /// screenshot (best effort), keep the sheet header in place, and
    /// append the row.
    ///
    /// Screenshot failures degrade to an empty link plus a warning; a
    /// failed header check or append surfaces as an error and no
    /// success is reported.
    pub async fn submit(
        &self,
        form: SubmissionFormDto,
        screenshot: Option<ScreenshotUpload>,
    ) -> Result<SubmissionOutcome> {
        let now = Local::now();

        let (screenshot_link, screenshot_warning) = match screenshot {
            Some(shot) => match self.upload_screenshot(&form.file_no, now, shot).await {
                Ok(link) => (link, None),
                Err(e) => {
                    warn!("Failed to compress and upload screenshot: {}", e);
                    (
                        String::new(),
                        Some(format!("Failed to compress and upload screenshot: {}", e)),
                    )
                }
            },
            None => (String::new(), None),
        };

        self.sheets.ensure_header().await?;

        let submission = Submission {
            recorded_at: now,
            auditor: form.auditor,
            file_no: form.file_no,
            error_description: form.error_description,
            screenshot_link,
        };
        self.sheets.append_row(submission.to_row()).await?;

        info!(
            "Submission logged: auditor={}, file_no={}, screenshot={}",
            submission.auditor,
            submission.file_no,
            !submission.screenshot_link.is_empty()
        );

        Ok(SubmissionOutcome {
            submission,
            screenshot_warning,
        })
    }

    async fn upload_screenshot(
        &self,
        file_no: &str,
        now: DateTime<Local>,
        shot: ScreenshotUpload,
    ) -> Result<String> {
        let normalized = image::normalize(&shot.data)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let filename = screenshot_filename(file_no, now);
        let file_id = self
            .drive
            .upload(&filename, normalized.data, normalized.content_type)
            .await?;

        Ok(view_url(&file_id))
    }
}

/// Drive display name for an uploaded screenshot.
///
/// Derived from file number plus date only, so two submissions for the
/// same file on the same day share a display name (Drive still stores
/// both; only link readability suffers).
pub fn screenshot_filename(file_no: &str, now: DateTime<Local>) -> String {
    format!("{} {}.jpg", file_no, now.format(FILENAME_DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_screenshot_filename_uses_file_no_and_date_only() {
        let now = Local.with_ymd_and_hms(2026, 8, 30, 14, 5, 0).unwrap();
        assert_eq!(screenshot_filename("F-1042", now), "F-1042 30-08-2026.jpg");
    }
}
