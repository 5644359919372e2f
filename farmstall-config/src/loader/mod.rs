pub mod error;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use log::{debug, info};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_API_TIMEOUT_SECS, DEFAULT_API_URL,
    DEFAULT_LOG_FILTER, ENV_API_TIMEOUT, ENV_API_URL, ENV_CONFIG_PATH,
    ENV_LOG, ENV_TOKEN_PATH, PROJECT_APPLICATION, PROJECT_ORGANIZATION,
    PROJECT_QUALIFIER, TOKEN_FILE_NAME,
};
use crate::models::sources::FileConfig;
use crate::models::{
    ApiConfig, Config, ConfigMetadata, LoggingConfig, StorageConfig,
};
use crate::util::{non_empty, normalize_base_url, parse_duration};

use self::error::ConfigLoadError;

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub metadata: ConfigMetadata,
}

/// Layered configuration loader.
///
/// Precedence, lowest first: compiled defaults, TOML file, `.env` file,
/// process environment.
pub struct ConfigLoader {
    env: EnvLookup,
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    api_url: Option<String>,
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("config_path", &self.config_path)
            .field("env_file", &self.env_file)
            .field("data_dir", &self.data_dir)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader reading the real process environment and `./.env`.
    pub fn new() -> Self {
        Self {
            env: Box::new(|key| std::env::var(key).ok()),
            config_path: None,
            env_file: Some(PathBuf::from(".env")),
            data_dir: None,
            api_url: None,
        }
    }

    /// Replace the environment lookup, mainly for tests.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(lookup);
        self
    }

    /// Use an explicit TOML file. A missing explicit file is an error,
    /// unlike the implicit `farmstall.toml` lookup.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Use a different `.env` file, or `None` to skip it.
    pub fn with_env_file(mut self, path: Option<PathBuf>) -> Self {
        self.env_file = path;
        self
    }

    /// Override the platform data directory used for the default token path.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Backend URL that wins over every other source. It is validated
    /// like any other base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut metadata = ConfigMetadata::default();

        let dotenv = self.read_env_file(&mut metadata)?;
        let lookup = |key: &str| {
            non_empty((self.env)(key)).or_else(|| non_empty(dotenv.get(key).cloned()))
        };

        let file = self.read_config_file(&lookup, &mut metadata)?;

        let raw_url = match non_empty(self.api_url.clone()) {
            Some(url) => url,
            None => match lookup(ENV_API_URL) {
                Some(url) => {
                    metadata.overridden_keys.push(ENV_API_URL);
                    url
                }
                None => file
                    .api
                    .base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            },
        };
        let base_url = validate_base_url(&raw_url)?;

        let timeout = match lookup(ENV_API_TIMEOUT) {
            Some(raw) => {
                metadata.overridden_keys.push(ENV_API_TIMEOUT);
                parse_timeout(&raw)?
            }
            None => match file.api.timeout.as_deref() {
                Some(raw) => parse_timeout(raw)?,
                None => Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            },
        };

        let token_path = match lookup(ENV_TOKEN_PATH) {
            Some(raw) => {
                metadata.overridden_keys.push(ENV_TOKEN_PATH);
                PathBuf::from(raw)
            }
            None => match file.storage.token_path.clone() {
                Some(path) => path,
                None => self.default_token_path()?,
            },
        };

        let filter = match lookup(ENV_LOG) {
            Some(raw) => {
                metadata.overridden_keys.push(ENV_LOG);
                raw
            }
            None => file
                .logging
                .filter
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };

        let config = Config {
            api: ApiConfig { base_url, timeout },
            storage: StorageConfig { token_path },
            logging: LoggingConfig { filter },
        };
        debug!("[Config] Resolved configuration: {:?}", config);

        Ok(ConfigLoad { config, metadata })
    }

    fn read_env_file(
        &self,
        metadata: &mut ConfigMetadata,
    ) -> Result<HashMap<String, String>, ConfigLoadError> {
        let Some(path) = self.env_file.as_ref() else {
            return Ok(HashMap::new());
        };
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let mut values = HashMap::new();
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = item?;
            values.insert(key, value);
        }
        info!("[Config] Loaded {} entries from {}", values.len(), path.display());
        metadata.env_file = Some(path.clone());
        Ok(values)
    }

    fn read_config_file(
        &self,
        lookup: &dyn Fn(&str) -> Option<String>,
        metadata: &mut ConfigMetadata,
    ) -> Result<FileConfig, ConfigLoadError> {
        let (path, explicit) = match (&self.config_path, lookup(ENV_CONFIG_PATH)) {
            (Some(path), _) => (path.clone(), true),
            (None, Some(raw)) => (PathBuf::from(raw), true),
            (None, None) => (PathBuf::from(CONFIG_FILE_NAME), false),
        };

        if !explicit && !path.exists() {
            return Ok(FileConfig::default());
        }

        let file = parse_config_file(&path)?;
        metadata.config_file = Some(path);
        Ok(file)
    }

    fn default_token_path(&self) -> Result<PathBuf, ConfigLoadError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.join(TOKEN_FILE_NAME));
        }
        let dirs = ProjectDirs::from(
            PROJECT_QUALIFIER,
            PROJECT_ORGANIZATION,
            PROJECT_APPLICATION,
        )
        .ok_or(ConfigLoadError::NoDataDirectory)?;
        Ok(dirs.data_dir().join(TOKEN_FILE_NAME))
    }
}

pub fn parse_config_file(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::ConfigFileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_base_url(raw: &str) -> Result<String, ConfigLoadError> {
    let normalized = normalize_base_url(raw);
    let parsed = url::Url::parse(&normalized).map_err(|source| {
        ConfigLoadError::InvalidBaseUrl {
            value: raw.to_string(),
            source,
        }
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigLoadError::UnsupportedScheme(raw.to_string()));
    }
    Ok(normalized)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigLoadError> {
    let timeout = parse_duration(raw).map_err(|source| {
        ConfigLoadError::InvalidTimeout {
            value: raw.to_string(),
            source,
        }
    })?;
    if timeout.is_zero() {
        return Err(ConfigLoadError::ZeroTimeout);
    }
    Ok(timeout)
}
