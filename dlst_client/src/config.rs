//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use dlst::DEFAULT_API_URL;
use std::path::PathBuf;
use std::time::Duration;

/// Default log destination; the terminal itself belongs to the UI.
pub const DEFAULT_LOG_FILE: &str = "dlst_client.log";

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin
    pub api_url: String,
    /// File that receives the log output
    pub log_file: PathBuf,
    /// How long success messages stay up before a modal closes itself
    pub dismiss_delay: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first, without
    /// overriding variables that are already set.
    ///
    /// # Arguments
    ///
    /// * `api_url_override` - Optional API origin override (from CLI args)
    /// * `log_file_override` - Optional log file override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if the `.env` file exists but cannot be parsed
    pub fn from_env(
        api_url_override: Option<String>,
        log_file_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        load_dotenv()?;

        let api_url = api_url_override
            .or_else(|| std::env::var("DLST_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let log_file = log_file_override
            .or_else(|| std::env::var("DLST_LOG_FILE").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        let dismiss_delay = Duration::from_millis(parse_env_or(
            "DLST_DISMISS_DELAY_MS",
            dlst::forms::DISMISS_DELAY.as_millis() as u64,
        ));

        Ok(ClientConfig {
            api_url,
            log_file,
            dismiss_delay,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "DLST_API_URL".to_string(),
                reason: format!("'{}' must start with http:// or https://", self.api_url),
            });
        }

        if self.log_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "DLST_LOG_FILE".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.dismiss_delay.is_zero() {
            return Err(ConfigError::Invalid {
                var: "DLST_DISMISS_DELAY_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            Ok(())
        }
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
