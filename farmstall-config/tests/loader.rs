use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use farmstall_config::{ConfigLoadError, ConfigLoader};
use tempfile::TempDir;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + Send + Sync + 'static {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn isolated_loader(dir: &TempDir) -> ConfigLoader {
    ConfigLoader::new()
        .with_env(env_from(&[]))
        .with_env_file(None)
        .with_data_dir(dir.path())
}

#[test]
fn defaults_apply_without_any_sources() {
    let dir = TempDir::new().unwrap();
    let load = isolated_loader(&dir).load().unwrap();

    assert_eq!(load.config.base_url(), "http://localhost:3000/api/v1");
    assert_eq!(load.config.api.timeout, Duration::from_secs(30));
    assert_eq!(load.config.token_path(), dir.path().join("session.json"));
    assert_eq!(load.config.logging.filter, "info");
    assert!(load.metadata.config_file.is_none());
    assert!(load.metadata.overridden_keys.is_empty());
}

#[test]
fn toml_file_then_environment_layering() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("farmstall.toml");
    fs::write(
        &path,
        r#"
[api]
base_url = "https://shop.example.com/api/v1/"
timeout = "45s"

[storage]
token_path = "/var/lib/farmstall/token.json"
"#,
    )
    .unwrap();

    let load = isolated_loader(&dir)
        .with_config_path(&path)
        .with_env(env_from(&[("FARMSTALL_API_TIMEOUT", "5")]))
        .load()
        .unwrap();

    assert_eq!(load.config.base_url(), "https://shop.example.com/api/v1");
    assert_eq!(load.config.api.timeout, Duration::from_secs(5));
    assert_eq!(
        load.config.token_path(),
        std::path::Path::new("/var/lib/farmstall/token.json")
    );
    assert_eq!(load.metadata.config_file.as_deref(), Some(path.as_path()));
    assert_eq!(load.metadata.overridden_keys, vec!["FARMSTALL_API_TIMEOUT"]);
}

#[test]
fn env_file_is_below_process_environment() {
    let dir = TempDir::new().unwrap();
    let env_path = dir.path().join(".env");
    fs::write(
        &env_path,
        "FARMSTALL_API_URL=http://from-dotenv:9000\nFARMSTALL_LOG=debug\n",
    )
    .unwrap();

    let load = isolated_loader(&dir)
        .with_env_file(Some(env_path.clone()))
        .with_env(env_from(&[("FARMSTALL_LOG", "warn")]))
        .load()
        .unwrap();

    assert_eq!(load.config.base_url(), "http://from-dotenv:9000");
    assert_eq!(load.config.logging.filter, "warn");
    assert_eq!(load.metadata.env_file.as_deref(), Some(env_path.as_path()));
}

#[test]
fn blank_environment_values_fall_through() {
    let dir = TempDir::new().unwrap();
    let load = isolated_loader(&dir)
        .with_env(env_from(&[("FARMSTALL_API_URL", "  ")]))
        .load()
        .unwrap();
    assert_eq!(load.config.base_url(), "http://localhost:3000/api/v1");
}

#[test]
fn invalid_values_are_reported() {
    let dir = TempDir::new().unwrap();

    let err = isolated_loader(&dir)
        .with_env(env_from(&[("FARMSTALL_API_TIMEOUT", "eventually")]))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::InvalidTimeout { .. }));

    let err = isolated_loader(&dir)
        .with_env(env_from(&[("FARMSTALL_API_TIMEOUT", "0")]))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::ZeroTimeout));

    let err = isolated_loader(&dir)
        .with_env(env_from(&[("FARMSTALL_API_URL", "ftp://files.example.com")]))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::UnsupportedScheme(_)));
}

#[test]
fn explicit_api_url_wins_and_is_validated() {
    let dir = TempDir::new().unwrap();

    let load = isolated_loader(&dir)
        .with_env(env_from(&[("FARMSTALL_API_URL", "http://env.example.com")]))
        .with_api_url("shop.example.com/api/v1/")
        .load()
        .unwrap();
    assert_eq!(load.config.base_url(), "http://shop.example.com/api/v1");

    let err = isolated_loader(&dir)
        .with_api_url("ftp://files.example.com")
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::UnsupportedScheme(_)));
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = isolated_loader(&dir)
        .with_config_path(dir.path().join("nope.toml"))
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::ConfigFileIo { .. }));
}

#[test]
fn unknown_toml_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("farmstall.toml");
    fs::write(&path, "[api]\nbase_uri = \"http://typo\"\n").unwrap();
    let err = isolated_loader(&dir)
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::ConfigFileParse { .. }));
}
