//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Default upload body limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration parameters.
///
/// Everything except the JWT secret has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Shared HMAC secret for bearer tokens
    pub jwt_secret: String,
    /// Backing CSV file for customers
    pub csv_file: PathBuf,
    /// Directory uploaded files are written to
    pub upload_dir: PathBuf,
    /// Optional directory with template overrides
    pub templates_dir: Option<PathBuf>,
    /// Maximum request body size for uploads
    pub max_upload_bytes: usize,
    /// File that receives a copy of the log output, appended to
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Creates a config with defaults for everything but the secret.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            server_port: 8080,
            jwt_secret: jwt_secret.into(),
            csv_file: PathBuf::from("customers.csv"),
            upload_dir: PathBuf::from("./uploads"),
            templates_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_file: None,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `JWT_SECRET` - HMAC secret (required)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CSV_FILE` - Customer backing file (default: customers.csv)
    /// - `UPLOAD_DIR` - Upload directory (default: ./uploads)
    /// - `TEMPLATES_DIR` - Template override directory (default: none)
    /// - `MAX_UPLOAD_BYTES` - Upload body limit (default: 10 MiB)
    /// - `LOG_FILE` - Append logs to this file as well as stdout (default: none)
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_default();
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must be set");
        }

        let defaults = Self::new(jwt_secret);
        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            csv_file: env::var("CSV_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_file),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            templates_dir: env::var("TEMPLATES_DIR").ok().map(PathBuf::from),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            log_file: env::var("LOG_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            jwt_secret: defaults.jwt_secret,
        })
    }

    /// Opens the configured log file for appending, creating it if needed.
    pub fn open_log_file(&self) -> Result<Option<File>> {
        let Some(path) = &self.log_file else {
            return Ok(None);
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        Ok(Some(file))
    }
}
