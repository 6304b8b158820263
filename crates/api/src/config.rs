use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default maximum size of an uploaded image (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Token bucket guarding the `/auth` endpoints, per client IP.
///
/// A client may send `burst` requests at once; the bucket then refills one
/// request every `window_secs / burst` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthRateLimit {
    pub burst: u32,
    pub window_secs: u64,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deployment environment name (default: `development`).
    pub app_env: String,
    /// Directory uploaded images are written to and served from.
    pub upload_dir: PathBuf,
    /// Origin prefixed to `/uploads/...` in stored image URLs.
    pub public_base_url: String,
    /// Largest accepted image upload in bytes.
    pub max_upload_bytes: usize,
    /// Rate limit for `/auth`; `None` disables it.
    pub auth_rate_limit: Option<AuthRateLimit>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                   |
    /// |-------------------------------|---------------------------|
    /// | `HOST`                        | `0.0.0.0`                 |
    /// | `PORT`                        | `5000`                    |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                      |
    /// | `APP_ENV`                     | `development`             |
    /// | `UPLOAD_DIR`                  | `public/uploads`          |
    /// | `PUBLIC_BASE_URL`             | `http://localhost:{PORT}` |
    /// | `MAX_UPLOAD_BYTES`            | `5242880`                 |
    /// | `AUTH_RATE_LIMIT_MAX`         | `20`, `0` in development  |
    /// | `AUTH_RATE_LIMIT_WINDOW_SECS` | `900`                     |
    ///
    /// `AUTH_RATE_LIMIT_MAX=0` turns the `/auth` rate limit off.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
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

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "public/uploads".into()),
        );

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let default_auth_max = if app_env == "development" { "0" } else { "20" };
        let auth_rate_limit_max: u32 = std::env::var("AUTH_RATE_LIMIT_MAX")
            .unwrap_or_else(|_| default_auth_max.into())
            .parse()
            .expect("AUTH_RATE_LIMIT_MAX must be a valid u32");
        let auth_rate_limit_window_secs: u64 = std::env::var("AUTH_RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("AUTH_RATE_LIMIT_WINDOW_SECS must be a valid u64");
        let auth_rate_limit = (auth_rate_limit_max > 0 && auth_rate_limit_window_secs > 0)
            .then_some(AuthRateLimit {
                burst: auth_rate_limit_max,
                window_secs: auth_rate_limit_window_secs,
            });

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_env,
            upload_dir,
            public_base_url,
            max_upload_bytes,
            auth_rate_limit,
            jwt,
        }
    }

    /// Whether internal error details may be returned to clients.
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    /// Whether the session cookie is restricted to HTTPS.
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
