//! Server configuration
//!
//! Built once at startup from environment variables (after `.env` is
//! loaded) and handed to each component.

use std::net::SocketAddr;
use std::path::PathBuf;

use auth::AuthConfig;
use auth::application::config::DEV_TOKEN_SECRET;
use capture::CaptureConfig;
use platform::config::{ConfigError, normalize_path_prefix, parse_bool, parse_list};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// Server configuration
#[derive(Clone)]
pub struct AppConfig {
    pub app_name: String,
    /// Normalized: leading `/`, no trailing `/`, empty for root
    pub api_prefix: String,
    pub secret_key: String,
    pub cors_origins: Vec<String>,
    pub storage_dir: PathBuf,
    pub enable_watermark: bool,
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub watermark_font: Option<PathBuf>,
    pub max_upload_mb: usize,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let enable_watermark = match get("ENABLE_WATERMARK") {
            Some(value) => parse_bool("ENABLE_WATERMARK", &value)?,
            None => true,
        };

        let bind_addr = match get("BIND_ADDR") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::new("BIND_ADDR", &value, "expected host:port"))?,
            None => SocketAddr::from(([0, 0, 0, 0], 8000)),
        };

        let max_upload_mb = match get("MAX_UPLOAD_MB") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(mb) if mb > 0 => mb,
                _ => {
                    return Err(ConfigError::new(
                        "MAX_UPLOAD_MB",
                        &value,
                        "expected a positive integer",
                    ));
                }
            },
            None => 50,
        };

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or_else(|| "pack-captures".to_string()),
            api_prefix: normalize_path_prefix(&get("API_PREFIX").unwrap_or_else(|| "/api".to_string())),
            secret_key: get("SECRET_KEY").unwrap_or_else(|| DEV_TOKEN_SECRET.to_string()),
            cors_origins: parse_list(
                &get("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            storage_dir: PathBuf::from(
                get("STORAGE_DIR").unwrap_or_else(|| "./data/images".to_string()),
            ),
            enable_watermark,
            database_path: PathBuf::from(
                get("DATABASE_PATH").unwrap_or_else(|| "./data/app.db".to_string()),
            ),
            bind_addr,
            watermark_font: get("WATERMARK_FONT").map(PathBuf::from),
            max_upload_mb,
        })
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key == DEV_TOKEN_SECRET
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::with_secret(self.secret_key.as_bytes())
    }

    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            storage_dir: self.storage_dir.clone(),
            watermark_enabled: self.enable_watermark,
            max_upload_bytes: self.max_upload_mb.saturating_mul(1024 * 1024),
            ..CaptureConfig::default()
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("app_name", &self.app_name)
            .field("api_prefix", &self.api_prefix)
            .field("secret_key", &"<redacted>")
            .field("cors_origins", &self.cors_origins)
            .field("storage_dir", &self.storage_dir)
            .field("enable_watermark", &self.enable_watermark)
            .field("database_path", &self.database_path)
            .field("bind_addr", &self.bind_addr)
            .field("watermark_font", &self.watermark_font)
            .field("max_upload_mb", &self.max_upload_mb)
            .finish()
    }
}
