use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}")]
    ConfigFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    ConfigFileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid API base URL '{value}'")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("invalid API timeout '{value}'")]
    InvalidTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("API timeout must be greater than zero")]
    ZeroTimeout,
    #[error("unable to determine a data directory for the session token")]
    NoDataDirectory,
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
