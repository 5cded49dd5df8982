//! Google API clients
//!
//! Service-account authentication plus thin Drive (file upload) and
//! Sheets (row append) clients built on reqwest.

mod auth;
mod drive;
mod sheets;

pub use auth::{GoogleTokenManager, ServiceAccountKey, TokenError};
pub use drive::{view_url, DriveClient};
pub use sheets::{header_matches, SheetsClient};

#[cfg(test)]
pub use auth::test_support;
