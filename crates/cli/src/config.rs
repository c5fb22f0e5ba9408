//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BOZOR_STORE_PATH` - Cart file (default: `.bozor/storage.json`)
//! - `BOZOR_NOTICE_DURATION_MS` - Notification lifetime (default: 2000)

use std::path::PathBuf;

use thiserror::Error;

use bozor_core::CartConfig;
use bozor_core::config::DEFAULT_NOTICE_DURATION_MS;

pub const DEFAULT_STORE_PATH: &str = ".bozor/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// JSON file holding the storage namespace
    pub store_path: PathBuf,
    /// Notification lifetime in milliseconds
    pub notice_duration_ms: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_path = lookup("BOZOR_STORE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from);

        let notice_duration_ms = match lookup("BOZOR_NOTICE_DURATION_MS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                ConfigError::InvalidEnvVar("BOZOR_NOTICE_DURATION_MS".to_string(), e.to_string())
            })?,
            None => DEFAULT_NOTICE_DURATION_MS,
        };

        Ok(Self {
            store_path,
            notice_duration_ms,
        })
    }

    /// Engine configuration with this CLI's notice duration.
    #[must_use]
    pub fn cart_config(&self) -> CartConfig {
        CartConfig::default().with_notice_duration(self.notice_duration_ms)
    }
}
