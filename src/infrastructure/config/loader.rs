use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use reqwest::Url;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file, relative to the working directory
pub const PROJECT_CONFIG: &str = ".jobwatch/config.yaml";

/// Uncommitted local overrides (credentials), relative to the working directory
pub const LOCAL_CONFIG: &str = ".jobwatch/local.yaml";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "JOBWATCH_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid server URL: {0:?}. Must be an absolute http(s) URL")]
    InvalidServerUrl(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid poll_interval_ms: {0}. Must be at least 1")]
    InvalidPollInterval(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("No job given. Pass one on the command line, set `job` in .jobwatch/config.yaml, or export JOBWATCH_JOB")]
    MissingJob,
}

/// Values given on the command line; unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,

    pub server: ServerOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .jobwatch/config.yaml (project config)
    /// 3. .jobwatch/local.yaml (project local overrides, optional)
    /// 4. Environment variables (JOBWATCH_* prefix, `__` for nesting)
    /// 5. Command-line overrides
    pub fn load(overrides: &ConfigOverrides) -> Result<Config> {
        Self::load_in(Path::new("."), overrides)
    }

    /// Load configuration with project files resolved against `root`
    pub fn load_in(root: &Path, overrides: &ConfigOverrides) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(root.join(PROJECT_CONFIG)))
            .merge(Yaml::file(root.join(LOCAL_CONFIG)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::defaults(overrides))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let url_ok = Url::parse(&config.server.url)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base());
        if !url_ok {
            return Err(ConfigError::InvalidServerUrl(config.server.url.clone()));
        }

        if config.server.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.server.timeout_secs));
        }

        if config.watch.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval(
                config.watch.poll_interval_ms,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }

    /// The job to operate on: explicit argument first, then configuration
    pub fn require_job(config: &Config, job: Option<String>) -> Result<String, ConfigError> {
        job.or_else(|| config.job.clone())
            .filter(|job| !job.trim().is_empty())
            .ok_or(ConfigError::MissingJob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::LogFormat;
    use std::fs;
    use tempfile::TempDir;

    fn project(config_yaml: &str, local_yaml: Option<&str>) -> TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join(".jobwatch")).unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG), config_yaml).unwrap();
        if let Some(local) = local_yaml {
            fs::write(dir.path().join(LOCAL_CONFIG), local).unwrap();
        }
        dir
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.url, "http://localhost:8080");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.watch.poll_interval_ms, 1_000);
        assert_eq!(config.logging.level, "warn");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_hierarchical_merging() {
        let dir = project(
            "job: api\nserver:\n  url: https://ci.example.com\n  user: builder\nlogging:\n  format: json\n",
            Some("server:\n  token: abc123\n"),
        );

        let config = temp_env::with_vars_unset(
            ["JOBWATCH_JOB", "JOBWATCH_SERVER__URL", "JOBWATCH_SERVER__TOKEN"],
            || ConfigLoader::load_in(dir.path(), &ConfigOverrides::default()),
        )
        .expect("config should load");

        assert_eq!(config.job.as_deref(), Some("api"));
        assert_eq!(config.server.url, "https://ci.example.com");
        assert_eq!(config.server.user.as_deref(), Some("builder"));
        assert_eq!(config.server.token.as_deref(), Some("abc123"));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.watch.idle_threshold_ms, 3_000, "defaults persist");
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = project("job: api\nserver:\n  url: https://ci.example.com\n", None);

        let config = temp_env::with_vars(
            [
                ("JOBWATCH_JOB", Some("web")),
                ("JOBWATCH_SERVER__TOKEN", Some("from-env")),
                ("JOBWATCH_WATCH__POLL_INTERVAL_MS", Some("250")),
            ],
            || ConfigLoader::load_in(dir.path(), &ConfigOverrides::default()),
        )
        .expect("config should load");

        assert_eq!(config.job.as_deref(), Some("web"));
        assert_eq!(config.server.token.as_deref(), Some("from-env"));
        assert_eq!(config.server.url, "https://ci.example.com");
        assert_eq!(config.watch.poll_interval_ms, 250);
    }

    #[test]
    fn test_command_line_overrides_everything() {
        let dir = project("job: api\nserver:\n  url: https://ci.example.com\n  user: builder\n", None);
        let overrides = ConfigOverrides {
            job: Some("cli-job".to_string()),
            server: ServerOverrides {
                url: Some("https://other.example.com".to_string()),
                ..Default::default()
            },
        };

        let config = temp_env::with_vars([("JOBWATCH_JOB", Some("env-job"))], || {
            ConfigLoader::load_in(dir.path(), &overrides)
        })
        .expect("config should load");

        assert_eq!(config.job.as_deref(), Some("cli-job"));
        assert_eq!(config.server.url, "https://other.example.com");
        assert_eq!(config.server.user.as_deref(), Some("builder"), "unset overrides keep file values");
    }

    #[test]
    fn test_missing_files_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_env::with_vars_unset(["JOBWATCH_JOB", "JOBWATCH_SERVER__URL"], || {
            ConfigLoader::load_in(dir.path(), &ConfigOverrides::default())
        })
        .expect("config should load");
        assert_eq!(config.job, None);
        assert_eq!(config.server.url, "http://localhost:8080");
    }

    #[test]
    fn test_validate_invalid_url() {
        for url in ["", "ci.example.com", "ftp://ci.example.com", "mailto:ci@example.com"] {
            let mut config = Config::default();
            config.server.url = url.to_string();
            assert!(
                matches!(ConfigLoader::validate(&config), Err(ConfigError::InvalidServerUrl(_))),
                "{url:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.server.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_validate_zero_poll_interval() {
        let mut config = Config::default();
        config.watch.poll_interval_ms = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPollInterval(0))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_require_job() {
        let mut config = Config::default();
        assert!(matches!(
            ConfigLoader::require_job(&config, None),
            Err(ConfigError::MissingJob)
        ));

        config.job = Some("api".to_string());
        assert_eq!(ConfigLoader::require_job(&config, None).unwrap(), "api");
        assert_eq!(
            ConfigLoader::require_job(&config, Some("web".to_string())).unwrap(),
            "web"
        );
        assert!(ConfigLoader::require_job(&config, Some("  ".to_string())).is_err());
    }
}
