use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    pub google: GoogleConfig,
    pub sheet: SheetConfig,
    pub drive: DriveConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Source of the Google service-account credential.
///
/// The credential JSON is normally injected through the environment
/// (secret store); a file path is supported for local development.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Inline service-account JSON from `GOOGLE_SERVICE_ACCOUNT`
    Inline(String),
    /// Path to a service-account JSON file from `GOOGLE_SERVICE_ACCOUNT_FILE`
    File(String),
}

/// Google API access configuration (service account + OAuth2 scopes)
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub credentials: CredentialSource,
    pub scopes: Vec<String>,
}

/// Target spreadsheet for appended submission rows
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub spreadsheet_id: String,
    pub sheet_name: String,
}

/// Target Drive folder for uploaded screenshots
#[derive(Debug, Clone)]
pub struct DriveConfig {
    pub folder_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            google: GoogleConfig::from_env()?,
            sheet: SheetConfig::from_env()?,
            drive: DriveConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Auditor Error Logger API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the auditor error logger".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl GoogleConfig {
    const DEFAULT_SCOPES: &'static [&'static str] = &[
        "https://www.googleapis.com/auth/drive",
        "https://www.googleapis.com/auth/spreadsheets",
    ];

    pub fn from_env() -> Result<Self, String> {
        // Inline JSON (secret store) takes precedence over a file path
        let credentials = match env::var("GOOGLE_SERVICE_ACCOUNT")
            .ok()
            .filter(|s| !s.is_empty())
        {
            Some(json) => CredentialSource::Inline(json),
            None => {
                let path = env::var("GOOGLE_SERVICE_ACCOUNT_FILE").map_err(|_| {
                    "GOOGLE_SERVICE_ACCOUNT or GOOGLE_SERVICE_ACCOUNT_FILE must be set".to_string()
                })?;
                CredentialSource::File(path)
            }
        };

        let scopes = env::var("GOOGLE_SCOPES")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|_| Self::DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect());

        Ok(Self {
            credentials,
            scopes,
        })
    }
}

impl SheetConfig {
    const DEFAULT_SHEET_NAME: &'static str = "Form Entries";

    pub fn from_env() -> Result<Self, String> {
        let spreadsheet_id = env::var("SPREADSHEET_ID")
            .map_err(|_| "SPREADSHEET_ID environment variable is required".to_string())?;

        let sheet_name =
            env::var("SHEET_NAME").unwrap_or_else(|_| Self::DEFAULT_SHEET_NAME.to_string());

        Ok(Self {
            spreadsheet_id,
            sheet_name,
        })
    }
}

impl DriveConfig {
    pub fn from_env() -> Result<Self, String> {
        let folder_id = env::var("DRIVE_FOLDER_ID")
            .map_err(|_| "DRIVE_FOLDER_ID environment variable is required".to_string())?;

        Ok(Self { folder_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let app = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size: 1024,
        };
        assert_eq!(app.server_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: "t".to_string(),
            version: "v".to_string(),
            description: "d".to_string(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials(), Some("admin:secret".to_string()));
    }
}
