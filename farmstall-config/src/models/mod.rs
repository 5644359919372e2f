pub mod sources;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn token_path(&self) -> &Path {
        &self.storage.token_path
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Normalized backend root, e.g. `http://localhost:3000/api/v1`.
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// JSON key/value file holding the persisted `shopToken`.
    pub token_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

/// Where each layer came from, for `whoami`-style diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigMetadata {
    pub config_file: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub overridden_keys: Vec<&'static str>,
}
