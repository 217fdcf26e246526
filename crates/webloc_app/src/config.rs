//! Run settings loaded from a RON file.
//!
//! Lookup order: an explicit `--config` path (must exist), then
//! `./webloc_tidy.ron` when present, then built-in defaults. Every field has a
//! default, so a partial file is valid.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use webloc_core::BatchPolicy;
use webloc_engine::{FetchSettings, ServiceSettings};

pub const DEFAULT_CONFIG_FILE: &str = "webloc_tidy.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {0} does not exist")]
    Missing(PathBuf),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub batch_size: usize,
    /// Total attempts per batch, including the first.
    pub max_attempts: u32,
    pub min_batch_interval_ms: u64,
    pub fetch_timeout_secs: u64,
    pub fetch_connect_timeout_secs: u64,
    pub service_timeout_secs: u64,
    pub service_endpoint: String,
    pub service_model: String,
    pub api_key: Option<String>,
    pub remove_duplicates: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let policy = BatchPolicy::default();
        let service = ServiceSettings::new("");
        Self {
            batch_size: policy.batch_size,
            max_attempts: policy.max_attempts,
            min_batch_interval_ms: policy.min_interval.as_millis() as u64,
            fetch_timeout_secs: 10,
            fetch_connect_timeout_secs: 10,
            service_timeout_secs: service.request_timeout.as_secs(),
            service_endpoint: service.endpoint,
            service_model: service.model,
            api_key: None,
            remove_duplicates: true,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        if self.service_endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("service_endpoint is empty".into()));
        }
        Ok(())
    }

    pub fn batch_policy(&self) -> BatchPolicy {
        BatchPolicy {
            batch_size: self.batch_size,
            max_attempts: self.max_attempts,
            min_interval: Duration::from_millis(self.min_batch_interval_ms),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.fetch_connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch_timeout_secs),
            ..FetchSettings::default()
        }
    }

    pub fn service_settings(&self, api_key: String) -> ServiceSettings {
        ServiceSettings {
            endpoint: self.service_endpoint.clone(),
            model: self.service_model.clone(),
            request_timeout: Duration::from_secs(self.service_timeout_secs),
            ..ServiceSettings::new(api_key)
        }
    }
}

/// Loads the config, looking for [`DEFAULT_CONFIG_FILE`] in the working directory.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_from(explicit, Path::new(DEFAULT_CONFIG_FILE))
}

pub fn load_from(explicit: Option<&Path>, fallback: &Path) -> Result<AppConfig, ConfigError> {
    let path = match explicit {
        Some(path) if !path.is_file() => return Err(ConfigError::Missing(path.to_path_buf())),
        Some(path) => path,
        None if fallback.is_file() => fallback,
        None => return Ok(AppConfig::default()),
    };

    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_batch_policy() {
        let config = AppConfig::default();
        assert_eq!(config.batch_policy(), BatchPolicy::default());
        assert!(config.remove_duplicates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_batch_size_is_invalid() {
        let config = AppConfig {
            batch_size: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
