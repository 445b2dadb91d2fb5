//! Configuration handling for the rating service.
//!
//! Everything is read from environment variables with development defaults.
//! Numeric values are parsed and validated up front so a bad deployment fails
//! at startup instead of on the first request.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Environment variable names.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_MAX_RATING: &str = "MAX_RATING";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_FETCH_MAX_RETRIES: &str = "FETCH_MAX_RETRIES";
pub const ENV_MAX_DOCUMENT_BYTES: &str = "MAX_DOCUMENT_BYTES";
pub const ENV_REDIRECT_TIMEOUT_SECS: &str = "REDIRECT_TIMEOUT_SECS";
pub const ENV_RETRY_BASE_DELAY_MS: &str = "RETRY_BASE_DELAY_MS";
pub const ENV_TRANSLATE_ENDPOINT: &str = "TRANSLATE_ENDPOINT";
pub const ENV_TRANSLATE_TIMEOUT_SECS: &str = "TRANSLATE_TIMEOUT_SECS";
pub const ENV_PUBLISHER_DOMAINS: &str = "PUBLISHER_DOMAINS";
pub const ENV_STAGING_DIR: &str = "STAGING_DIR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MAX_RATING: f64 = 3.7;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_FETCH_MAX_RETRIES: u32 = 3;
const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 50 * 1024 * 1024; // 50MB
const DEFAULT_REDIRECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 200;
const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
const DEFAULT_TRANSLATE_TIMEOUT_SECS: u64 = 15;

/// Plan publishers whose hosted documents are accepted without a `.pdf` suffix.
pub const DEFAULT_PUBLISHER_DOMAINS: [&str; 4] =
    ["scanhealthplan.com", "cigna.com", "uhc.com", "humana.com"];

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    bind_addr: String,
    max_rating: f64,
    fetch_timeout: Duration,
    fetch_max_retries: u32,
    max_document_bytes: u64,
    redirect_timeout: Duration,
    retry_base_delay: Duration,
    translate_endpoint: String,
    translate_timeout: Duration,
    publisher_domains: Vec<String>,
    staging_dir: PathBuf,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let max_rating: f64 = parse_var(ENV_MAX_RATING, DEFAULT_MAX_RATING)?;
        if !max_rating.is_finite() || max_rating <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_MAX_RATING,
                reason: "must be a positive number".to_string(),
            });
        }

        let fetch_timeout_secs: u64 = parse_var(ENV_FETCH_TIMEOUT_SECS, DEFAULT_FETCH_TIMEOUT_SECS)?;
        let redirect_timeout_secs: u64 =
            parse_var(ENV_REDIRECT_TIMEOUT_SECS, DEFAULT_REDIRECT_TIMEOUT_SECS)?;
        let translate_timeout_secs: u64 =
            parse_var(ENV_TRANSLATE_TIMEOUT_SECS, DEFAULT_TRANSLATE_TIMEOUT_SECS)?;
        for (field, secs) in [
            (ENV_FETCH_TIMEOUT_SECS, fetch_timeout_secs),
            (ENV_REDIRECT_TIMEOUT_SECS, redirect_timeout_secs),
            (ENV_TRANSLATE_TIMEOUT_SECS, translate_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "timeout must be at least one second".to_string(),
                });
            }
        }

        let fetch_max_retries = parse_var(ENV_FETCH_MAX_RETRIES, DEFAULT_FETCH_MAX_RETRIES)?;
        let max_document_bytes = parse_var(ENV_MAX_DOCUMENT_BYTES, DEFAULT_MAX_DOCUMENT_BYTES)?;
        let retry_base_delay_ms = parse_var(ENV_RETRY_BASE_DELAY_MS, DEFAULT_RETRY_BASE_DELAY_MS)?;

        let translate_endpoint = env::var(ENV_TRANSLATE_ENDPOINT)
            .unwrap_or_else(|_| DEFAULT_TRANSLATE_ENDPOINT.to_string());
        if url::Url::parse(&translate_endpoint).is_err() {
            return Err(ConfigError::InvalidValue {
                field: ENV_TRANSLATE_ENDPOINT,
                reason: format!("not an absolute url: {translate_endpoint}"),
            });
        }

        let publisher_domains = match env::var(ENV_PUBLISHER_DOMAINS) {
            Ok(raw) => parse_domains(&raw),
            Err(_) => DEFAULT_PUBLISHER_DOMAINS.iter().map(|d| d.to_string()).collect(),
        };

        let staging_dir = env::var(ENV_STAGING_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir());

        Ok(Self {
            bind_addr,
            max_rating,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            fetch_max_retries,
            max_document_bytes,
            redirect_timeout: Duration::from_secs(redirect_timeout_secs),
            retry_base_delay: Duration::from_millis(retry_base_delay_ms),
            translate_endpoint,
            translate_timeout: Duration::from_secs(translate_timeout_secs),
            publisher_domains,
            staging_dir,
        })
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_rating: DEFAULT_MAX_RATING,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            fetch_max_retries: DEFAULT_FETCH_MAX_RETRIES,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            redirect_timeout: Duration::from_secs(DEFAULT_REDIRECT_TIMEOUT_SECS),
            retry_base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
            translate_endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            translate_timeout: Duration::from_secs(DEFAULT_TRANSLATE_TIMEOUT_SECS),
            publisher_domains: DEFAULT_PUBLISHER_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            staging_dir: env::temp_dir(),
        }
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Ceiling of the produced star rating.
    pub fn max_rating(&self) -> f64 {
        self.max_rating
    }
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    /// Additional attempts after the first on transient transport failures.
    pub fn fetch_max_retries(&self) -> u32 {
        self.fetch_max_retries
    }
    pub fn max_document_bytes(&self) -> u64 {
        self.max_document_bytes
    }
    pub fn redirect_timeout(&self) -> Duration {
        self.redirect_timeout
    }
    pub fn retry_base_delay(&self) -> Duration {
        self.retry_base_delay
    }
    pub fn translate_endpoint(&self) -> &str {
        &self.translate_endpoint
    }
    pub fn translate_timeout(&self) -> Duration {
        self.translate_timeout
    }
    pub fn publisher_domains(&self) -> &[String] {
        &self.publisher_domains
    }
    /// Directory where downloaded documents are staged during extraction.
    pub fn staging_dir(&self) -> &PathBuf {
        &self.staging_dir
    }

    pub fn with_translate_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.translate_endpoint = endpoint.into();
        self
    }

    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }
}

fn parse_var<T: FromStr>(field: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(field) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field,
            reason: format!("could not parse '{raw}'"),
        }),
        Err(_) => Ok(default),
    }
}

fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().trim_start_matches('.').to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
