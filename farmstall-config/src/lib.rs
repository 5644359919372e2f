//! Shared configuration library for Farmstall.
//!
//! Configuration is assembled in layers: compiled defaults, an optional TOML
//! file, a `.env` file and finally process environment variables. The result
//! tells the client where the commerce backend lives, how long to wait for
//! it, and where the session token is persisted between runs.
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{
    ApiConfig, Config, ConfigMetadata, LoggingConfig, StorageConfig,
    sources::FileConfig,
};
