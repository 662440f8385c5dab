use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Main configuration structure for jobwatch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// CI server connection settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Default job name used when a command is not given one
    #[serde(default)]
    pub job: Option<String>,

    /// Local path of the job configuration document for pull/push
    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,

    /// Live tail timing
    #[serde(default)]
    pub watch: WatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_config_file() -> PathBuf {
    PathBuf::from("config.xml")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            job: None,
            config_file: default_config_file(),
            watch: WatchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// CI server connection configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Base URL of the CI server
    #[serde(default = "default_server_url")]
    pub url: String,

    /// User name for basic authentication
    #[serde(default)]
    pub user: Option<String>,

    /// API token (or password) for basic authentication
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            user: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Live tail timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WatchConfig {
    /// Delay between polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Silence after which the waiting-for-output indicator is shown
    #[serde(default = "default_idle_threshold_ms")]
    pub idle_threshold_ms: u64,
}

const fn default_poll_interval_ms() -> u64 {
    1_000
}

const fn default_idle_threshold_ms() -> u64 {
    3_000
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            idle_threshold_ms: default_idle_threshold_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console log format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling JSON log files (console only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for file logs
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_debug_redacts_token() {
        let server = ServerConfig {
            token: Some("11a2b3c4d5e6f7".to_string()),
            ..Default::default()
        };
        let rendered = format!("{server:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("11a2b3c4d5e6f7"));
    }

    #[test]
    fn test_yaml_defaults_fill_missing_sections() {
        let config: Config = serde_yaml::from_str("job: api\n").expect("YAML should parse");
        assert_eq!(config.job.as_deref(), Some("api"));
        assert_eq!(config.watch.poll_interval_ms, 1_000);
        assert_eq!(config.watch.idle_threshold_ms, 3_000);
        assert_eq!(config.config_file, PathBuf::from("config.xml"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }
}
