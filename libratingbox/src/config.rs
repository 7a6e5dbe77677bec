//! Configuration management for RatingBox

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::service::events::DEFAULT_CAPACITY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub submitter: SubmitterConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

/// Which submitter backs the rating box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitterConfig {
    Http {
        endpoint: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    Mock {
        #[serde(default)]
        delay_ms: u64,
        #[serde(default)]
        fail_with: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsConfig {
    pub capacity: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to the defaults when no file exists
    pub fn load_or_default() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Create a default configuration
    ///
    /// Uses a mock submitter so the widget works without a backend.
    pub fn default_config() -> Self {
        Self {
            submitter: SubmitterConfig::Mock {
                delay_ms: 500,
                fail_with: None,
            },
            tracker: TrackerConfig::default(),
            events: EventsConfig::default(),
        }
    }

    /// Reject values that would make the rating box unusable
    pub fn validate(&self) -> Result<()> {
        if let SubmitterConfig::Http {
            endpoint,
            timeout_secs,
        } = &self.submitter
        {
            if endpoint.trim().is_empty() {
                return Err(ConfigError::MissingField("submitter.endpoint".to_string()).into());
            }
            if *timeout_secs == 0 {
                return Err(ConfigError::InvalidValue(
                    "submitter.timeout_secs must be greater than 0".to_string(),
                )
                .into());
            }
        }

        if self.events.capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "events.capacity must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("RATINGBOX_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("ratingbox").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_http_config() {
        let file = write_config(
            r#"
[submitter]
kind = "http"
endpoint = "https://api.example.com/ratings"
timeout_secs = 3

[tracker]
enabled = false

[events]
capacity = 16
"#,
        );

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(
            config.submitter,
            SubmitterConfig::Http {
                endpoint: "https://api.example.com/ratings".to_string(),
                timeout_secs: 3,
            }
        );
        assert!(!config.tracker.enabled);
        assert_eq!(config.events.capacity, 16);
    }

    #[test]
    fn test_optional_sections_default() {
        let file = write_config(
            r#"
[submitter]
kind = "http"
endpoint = "https://api.example.com/ratings"
"#,
        );

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(
            config.submitter,
            SubmitterConfig::Http {
                endpoint: "https://api.example.com/ratings".to_string(),
                timeout_secs: 10,
            }
        );
        assert!(config.tracker.enabled);
        assert_eq!(config.events.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_load_mock_config() {
        let file = write_config(
            r#"
[submitter]
kind = "mock"
fail_with = "backend down"
"#,
        );

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(
            config.submitter,
            SubmitterConfig::Mock {
                delay_ms: 0,
                fail_with: Some("backend down".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_submitter_section_is_parse_error() {
        let file = write_config("[tracker]\nenabled = true\n");

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/ratingbox.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default_config();
        config.submitter = SubmitterConfig::Http {
            endpoint: "https://api.example.com/ratings".to_string(),
            timeout_secs: 0,
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let mut config = Config::default_config();
        config.submitter = SubmitterConfig::Http {
            endpoint: "  ".to_string(),
            timeout_secs: 10,
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("submitter.endpoint"));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = Config::default_config();
        config.events.capacity = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        Config::default_config().validate().unwrap();
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        std::env::set_var("RATINGBOX_CONFIG", "/tmp/ratingbox-test.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("RATINGBOX_CONFIG");

        assert_eq!(path, PathBuf::from("/tmp/ratingbox-test.toml"));
    }

    #[test]
    #[serial]
    fn test_load_or_default_without_file() {
        std::env::set_var("RATINGBOX_CONFIG", "/nonexistent/dir/config.toml");
        let config = Config::load_or_default();
        std::env::remove_var("RATINGBOX_CONFIG");

        assert_eq!(config.unwrap(), Config::default_config());
    }

    #[test]
    #[serial]
    fn test_load_from_env_path() {
        let file = write_config("[submitter]\nkind = \"mock\"\ndelay_ms = 25\n");
        std::env::set_var("RATINGBOX_CONFIG", file.path());
        let config = Config::load();
        std::env::remove_var("RATINGBOX_CONFIG");

        assert_eq!(
            config.unwrap().submitter,
            SubmitterConfig::Mock {
                delay_ms: 25,
                fail_with: None,
            }
        );
    }
}
