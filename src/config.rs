//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ApiClientConfig;
use crate::render::StalenessPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sentiment API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; unset means no timeout
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,

    #[serde(default = "default_tweet_count")]
    pub tweet_count: u32,
}

fn default_base_url() -> String {
    "http://localhost:5001/api".to_string()
}

fn default_tweet_count() -> u32 {
    100
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: None,
            tweet_count: default_tweet_count(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Auto-refresh configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Drop trend responses older than the last one shown
    #[serde(default)]
    pub discard_stale: bool,
}

fn default_interval_ms() -> u64 {
    60_000 // 1 minute
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            discard_stale: false,
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn staleness_policy(&self) -> StalenessPolicy {
        if self.discard_stale {
            StalenessPolicy::LatestIssued
        } else {
            StalenessPolicy::LastCompleted
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
        if config.refresh.interval_ms == 0 {
            return Err("refresh.interval_ms must be greater than zero".to_string());
        }
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Search the default locations, falling back to environment only
    ///
    /// Nothing is logged here since this usually runs before tracing is set
    /// up; call [`DiscoveredConfig::log`] afterwards.
    pub fn discover() -> DiscoveredConfig {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("sentiment-dashboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::discover_in(&config_paths)
    }

    /// Load the first candidate that exists and parses
    pub fn discover_in(paths: &[PathBuf]) -> DiscoveredConfig {
        let mut rejected = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return DiscoveredConfig {
                        config,
                        source: Some(path.clone()),
                        rejected,
                    }
                }
                Err(e) => rejected.push(e),
            }
        }

        DiscoveredConfig {
            config: Self::from_env(),
            source: None,
            rejected,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("SENTIMENT_API_URL") {
            self.api.base_url = url;
        }
        if let Some(count) = var("SENTIMENT_TWEET_COUNT").and_then(|s| s.parse().ok()) {
            self.api.tweet_count = count;
        }

        // Refresh overrides
        if let Some(ms) = var("SENTIMENT_REFRESH_INTERVAL_MS").and_then(|s| s.parse().ok()) {
            if ms > 0 {
                self.refresh.interval_ms = ms;
            }
        }

        // Logging overrides
        if let Some(level) = var("SENTIMENT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SENTIMENT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of searching for a config file
#[derive(Debug)]
pub struct DiscoveredConfig {
    pub config: Config,
    /// File the config was read from; `None` means defaults plus environment
    pub source: Option<PathBuf>,
    /// Candidates that exist but failed to load
    pub rejected: Vec<ConfigError>,
}

impl DiscoveredConfig {
    /// Report where the config came from
    pub fn log(&self) {
        for error in &self.rejected {
            tracing::warn!("{}", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sentiment Dashboard Configuration
#
# Environment variables override these settings:
# - SENTIMENT_API_URL
# - SENTIMENT_TWEET_COUNT
# - SENTIMENT_REFRESH_INTERVAL_MS
# - SENTIMENT_LOG_LEVEL
# - SENTIMENT_LOG_FORMAT

[api]
# Base URL of the sentiment API, including the /api prefix
base_url = "http://localhost:5001/api"

# Per-request timeout in milliseconds (unset = no timeout)
# request_timeout_ms = 10000

# Tweets to analyze per keyword search
tweet_count = 100

[refresh]
# Auto-refresh interval for trends (ms)
interval_ms = 60000

# Drop trend responses that finish after a newer one was shown
discard_stale = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
