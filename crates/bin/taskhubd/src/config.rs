//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `taskhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine timing settings.
    pub engine: EngineConfig,
    /// Notification channel settings.
    pub notify: NotifyConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Poll and cooldown timing.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds between alert poll cycles.
    pub poll_interval_secs: u64,
    /// Seconds a notification tag is suppressed after firing.
    pub cooldown_secs: u64,
}

/// Outward notification channel.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Webhook endpoint for notifications. Empty disables delivery.
    pub webhook_url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `taskhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the resulting values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("taskhub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("TASKHUB_POLL_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                self.engine.poll_interval_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("TASKHUB_COOLDOWN_SECS") {
            if let Ok(secs) = val.parse() {
                self.engine.cooldown_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("TASKHUB_WEBHOOK_URL") {
            self.notify.webhook_url = val;
        }
        if let Ok(val) = std::env::var("TASKHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Period between poll cycles.
    #[must_use]
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.engine.poll_interval_secs)
    }

    /// Suppression window for repeated notification tags.
    #[must_use]
    pub fn cooldown_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.engine.cooldown_secs).unwrap_or(i64::MAX))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5 * 60,
            cooldown_secs: 30 * 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "taskhubd=info,taskhub=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
