//! Server configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for the HTTP server, datastore and stats refresh.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// SQLite database file (created if missing).
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Seconds between periodic average-attempts refreshes. Disabled when
    /// absent; games still trigger a refresh when created.
    #[serde(default)]
    stats_refresh_secs: Option<u64>,
}

#[instrument]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[instrument]
fn default_port() -> u16 {
    3000
}

#[instrument]
fn default_db_path() -> String {
    "hangman.db".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db_path: default_db_path(),
            stats_refresh_secs: None,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        if config.stats_refresh_secs == Some(0) {
            return Err(ConfigError::new(
                "stats_refresh_secs must be greater than zero".to_string(),
            ));
        }
        info!(host = %config.host, port = config.port, db_path = %config.db_path, "Config loaded");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise starts from defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces any setting for which an override is given.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        db_path: Option<String>,
        stats_refresh_secs: Option<u64>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(secs) = stats_refresh_secs.filter(|s| *s > 0) {
            self.stats_refresh_secs = Some(secs);
        }
        self
    }

    /// Interval for periodic stats refresh, if enabled.
    pub fn stats_refresh_interval(&self) -> Option<Duration> {
        self.stats_refresh_secs.map(Duration::from_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_takes_defaults() {
        let config = ServerConfig::from_toml("port = 8080\n").expect("Parse failed");
        assert_eq!(*config.port(), 8080);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.db_path(), "hangman.db");
        assert_eq!(config.stats_refresh_interval(), None);
    }

    #[test]
    fn test_zero_refresh_interval_rejected() {
        let result = ServerConfig::from_toml("stats_refresh_secs = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let config = ServerConfig::from_toml("host = \"0.0.0.0\"\nstats_refresh_secs = 60\n")
            .expect("Parse failed")
            .with_overrides(None, Some(4000), Some("other.db".to_string()), None);
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(*config.port(), 4000);
        assert_eq!(config.db_path(), "other.db");
        assert_eq!(config.stats_refresh_interval(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServerConfig::load_or_default("/nonexistent/hangman.toml").expect("Load failed");
        assert_eq!(config, ServerConfig::default());
    }
}
