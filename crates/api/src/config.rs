use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default cap for multipart bodies: four onboarding documents or a large
/// lead spreadsheet.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploaded files are written to and served from.
    pub upload_dir: PathBuf,
    /// Body size cap for multipart upload routes (default: 25 MiB).
    pub max_upload_bytes: usize,
    /// Public onboarding form link sent in invitation emails.
    pub form_url: String,
    /// PDF attached to invitation emails when the file exists.
    pub form_pdf_path: Option<PathBuf>,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `MAX_UPLOAD_BYTES`     | `26214400`                 |
    /// | `FORM_URL`             | `http://localhost:5173/onboard` |
    /// | `FORM_PDF_PATH`        | unset                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let form_url = std::env::var("FORM_URL")
            .unwrap_or_else(|_| "http://localhost:5173/onboard".into());

        let form_pdf_path = std::env::var("FORM_PDF_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            max_upload_bytes,
            form_url,
            form_pdf_path,
            jwt,
        }
    }
}

/// Credentials for the super admin created on first start.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

impl SeedAdmin {
    /// Read `SEED_ADMIN_EMAIL` and `SEED_ADMIN_PASSWORD`; `None` unless both
    /// are set.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("SEED_ADMIN_EMAIL").ok()?;
        let password = std::env::var("SEED_ADMIN_PASSWORD").ok()?;
        Some(Self { email, password })
    }
}
