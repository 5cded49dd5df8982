//! Google Sheets client for the shared error log
//!
//! Resolves the configured worksheet tab once at startup, keeps the log
//! header in place, and appends one row per submission via the Sheets
//! v4 values API.

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::core::config::SheetConfig;
use crate::core::error::AppError;
use crate::modules::google::GoogleTokenManager;
use crate::shared::constants::SHEET_HEADER;

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

/// Response from `values.get`; `values` is absent for an empty range
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

pub struct SheetsClient {
    config: SheetConfig,
    auth: Arc<GoogleTokenManager>,
    client: reqwest::Client,
    base_url: String,
    /// Numeric id of the configured tab, resolved once at startup
    sheet_id: OnceCell<i64>,
}

impl SheetsClient {
    pub fn new(config: SheetConfig, auth: Arc<GoogleTokenManager>) -> Self {
        Self {
            config,
            auth,
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            sheet_id: OnceCell::new(),
        }
    }

    /// Resolve the configured worksheet tab to its numeric sheet id.
    ///
    /// Called during startup; a missing spreadsheet, bad credentials, or
    /// an unknown tab name halts the whole service here.
    pub async fn open_tab(&self) -> Result<i64, AppError> {
        self.sheet_id
            .get_or_try_init(|| self.lookup_sheet_id())
            .await
            .copied()
    }

    async fn lookup_sheet_id(&self) -> Result<i64, AppError> {
        let url = format!(
            "{}/{}?fields=sheets.properties",
            self.base_url, self.config.spreadsheet_id
        );
        let meta: SpreadsheetMeta = self.get_json(&url).await?;

        meta.sheets
            .into_iter()
            .map(|s| s.properties)
            .find(|p| p.title == self.config.sheet_name)
            .map(|p| p.sheet_id)
            .ok_or_else(|| {
                AppError::ExternalServiceError(format!(
                    "Worksheet '{}' not found in spreadsheet {}",
                    self.config.sheet_name, self.config.spreadsheet_id
                ))
            })
    }

    /// Ensure row 1 holds the log header.
    ///
    /// Inserts a header row at the top (shifting existing rows down)
    /// when the sheet is empty or row 1 differs from [`SHEET_HEADER`];
    /// an intact header is left untouched.
    pub async fn ensure_header(&self) -> Result<(), AppError> {
        let first_row = self.read_first_row().await?;
        if header_matches(first_row.as_deref()) {
            debug!("Sheet header intact, leaving row 1 untouched");
            return Ok(());
        }

        info!(
            "Sheet header missing or mismatched, inserting header row into '{}'",
            self.config.sheet_name
        );
        self.insert_header_row().await
    }

    async fn read_first_row(&self) -> Result<Option<Vec<String>>, AppError> {
        let url = format!(
            "{}/{}/values/{}",
            self.base_url,
            self.config.spreadsheet_id,
            urlencoding::encode(&self.first_row_range())
        );
        let range: ValueRange = self.get_json(&url).await?;
        Ok(range.values.into_iter().next())
    }

    async fn insert_header_row(&self) -> Result<(), AppError> {
        let sheet_id = self.open_tab().await?;

        // Shift everything down by one row, then write the header
        let url = format!(
            "{}/{}:batchUpdate",
            self.base_url, self.config.spreadsheet_id
        );
        let body = json!({
            "requests": [{
                "insertDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": 0,
                        "endIndex": 1,
                    },
                    "inheritFromBefore": false,
                }
            }]
        });
        self.post_json(&url, &body).await?;

        let url = format!(
            "{}/{}/values/{}?valueInputOption=RAW",
            self.base_url,
            self.config.spreadsheet_id,
            urlencoding::encode(&self.first_row_range())
        );
        let body = json!({
            "range": self.first_row_range(),
            "majorDimension": "ROWS",
            "values": [SHEET_HEADER],
        });

        let token = self.bearer().await?;
        let response = self
            .client
            .put(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Sheets request failed: {}", e))
            })?;
        Self::check_status("write header row", response).await?;

        Ok(())
    }

    /// Append one submission row after the current table
    pub async fn append_row(&self, row: Vec<String>) -> Result<(), AppError> {
        let url = format!(
            "{}/{}/values/{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.base_url,
            self.config.spreadsheet_id,
            urlencoding::encode(&quote_sheet_title(&self.config.sheet_name))
        );
        let body = json!({ "values": [row] });
        self.post_json(&url, &body).await?;

        debug!("Appended row to '{}'", self.config.sheet_name);
        Ok(())
    }

    fn first_row_range(&self) -> String {
        format!("{}!1:1", quote_sheet_title(&self.config.sheet_name))
    }

    async fn bearer(&self) -> Result<String, AppError> {
        let token = self
            .auth
            .get_access_token()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;
        Ok(token.access_token)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Sheets request failed: {}", e))
            })?;
        let response = Self::check_status("read", response).await?;

        response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Bad Sheets API response: {}", e))
        })
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<(), AppError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&token)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Sheets request failed: {}", e))
            })?;
        Self::check_status("write", response).await?;
        Ok(())
    }

    async fn check_status(
        action: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AppError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalServiceError(format!(
            "Sheets {} failed: HTTP {} - {}",
            action, status, body
        )))
    }
}

/// True iff the first row equals the fixed 5-column header exactly
pub fn header_matches(first_row: Option<&[String]>) -> bool {
    match first_row {
        Some(row) => {
            row.len() == SHEET_HEADER.len() && row.iter().zip(SHEET_HEADER.iter()).all(|(a, b)| a == b)
        }
        None => false,
    }
}

/// Quote a sheet title for an A1 range; embedded quotes are doubled
fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_header_matches_exact_header() {
        let first = row(&[
            "DateTime",
            "Auditor",
            "File No",
            "Error Description",
            "Screenshot Link",
        ]);
        assert!(header_matches(Some(&first)));
    }

    #[test]
    fn test_empty_sheet_needs_header() {
        assert!(!header_matches(None));
    }

    #[test]
    fn test_mismatched_first_row_needs_header() {
        let first = row(&["01-01-2026 10:00", "A", "F1", "desc", ""]);
        assert!(!header_matches(Some(&first)));
    }

    #[test]
    fn test_short_or_extended_first_row_needs_header() {
        let short = row(&["DateTime", "Auditor"]);
        assert!(!header_matches(Some(&short)));

        let long = row(&[
            "DateTime",
            "Auditor",
            "File No",
            "Error Description",
            "Screenshot Link",
            "Extra",
        ]);
        assert!(!header_matches(Some(&long)));
    }

    #[test]
    fn test_sheet_title_quoting() {
        assert_eq!(quote_sheet_title("Form Entries"), "'Form Entries'");
        assert_eq!(quote_sheet_title("Bob's Log"), "'Bob''s Log'");
    }
}
