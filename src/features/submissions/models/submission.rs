use chrono::{DateTime, Local};

use crate::shared::constants::ROW_TIMESTAMP_FORMAT;

/// One logical form-entry event, materialized as one appended sheet row.
///
/// Created once per submit and never updated or deleted.
#[derive(Debug, Clone)]
pub struct Submission {
    pub recorded_at: DateTime<Local>,
    pub auditor: String,
    pub file_no: String,
    pub error_description: String,
    /// Drive viewer URL, or empty when no screenshot survived
    pub screenshot_link: String,
}

impl Submission {
    /// Render the 5-cell row in header order:
    /// DateTime, Auditor, File No, Error Description, Screenshot Link
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.recorded_at.format(ROW_TIMESTAMP_FORMAT).to_string(),
            self.auditor.clone(),
            self.file_no.clone(),
            self.error_description.clone(),
            self.screenshot_link.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_row_order_and_minute_precision_timestamp() {
        let submission = Submission {
            recorded_at: Local.with_ymd_and_hms(2026, 8, 30, 14, 5, 42).unwrap(),
            auditor: "A".to_string(),
            file_no: "F1".to_string(),
            error_description: "desc".to_string(),
            screenshot_link: String::new(),
        };

        // Seconds are dropped; the empty link still occupies the fifth cell
        assert_eq!(
            submission.to_row(),
            vec!["30-08-2026 14:05", "A", "F1", "desc", ""]
        );
    }

    #[test]
    fn test_row_carries_screenshot_link_when_present() {
        let submission = Submission {
            recorded_at: Local.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap(),
            auditor: "B".to_string(),
            file_no: "F2".to_string(),
            error_description: "wrong total".to_string(),
            screenshot_link: "https://drive.google.com/file/d/xyz/view?usp=sharing".to_string(),
        };

        let row = submission.to_row();
        assert_eq!(row.len(), 5);
        assert_eq!(row[4], "https://drive.google.com/file/d/xyz/view?usp=sharing");
    }
}
