//! Defaults and environment variable names.

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// File the token store writes, relative to the platform data directory.
pub const TOKEN_FILE_NAME: &str = "session.json";
/// TOML file looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "farmstall.toml";

pub const ENV_CONFIG_PATH: &str = "FARMSTALL_CONFIG";
pub const ENV_API_URL: &str = "FARMSTALL_API_URL";
pub const ENV_API_TIMEOUT: &str = "FARMSTALL_API_TIMEOUT";
pub const ENV_TOKEN_PATH: &str = "FARMSTALL_TOKEN_PATH";
pub const ENV_LOG: &str = "FARMSTALL_LOG";

pub const PROJECT_QUALIFIER: &str = "";
pub const PROJECT_ORGANIZATION: &str = "farmstall";
pub const PROJECT_APPLICATION: &str = "farmstall";
