//! Configuration loading and oracle key resolution tests
//!
//! Tests that touch PERPLEXITY_API_KEY are marked #[serial] so they do not
//! race each other on the process environment.

use ivf_common::config::{load_toml_config, resolve_oracle_api_key, TomlConfig, ORACLE_API_KEY_ENV};
use ivf_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.toml");

    let config = load_toml_config(Some(&path)).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_load_full_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
port = 4000
bind_address = "0.0.0.0"
database_path = "/tmp/ivf-test.db"

[logging]
level = "debug"

[oracle]
api_key = "toml-key"
base_url = "http://localhost:9999"
timeout_secs = 5

[rate_limit]
max_requests = 10
window_secs = 60

[cors]
allowed_origins = ["https://dashboard.example.org"]
"#
    )
    .unwrap();

    let config = load_toml_config(Some(&path)).unwrap();
    assert_eq!(config.port, 4000);
    assert_eq!(config.bind_address, "0.0.0.0");
    assert_eq!(
        config.database_path.as_deref(),
        Some(std::path::Path::new("/tmp/ivf-test.db"))
    );
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.oracle.api_key.as_deref(), Some("toml-key"));
    assert_eq!(config.oracle.timeout_secs, 5);
    assert_eq!(config.oracle.model, "sonar-pro");
    assert_eq!(config.rate_limit.max_requests, 10);
    assert_eq!(config.cors.allowed_origins, vec!["https://dashboard.example.org"]);
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    let result = load_toml_config(Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_env_key_takes_priority_over_toml() {
    env::set_var(ORACLE_API_KEY_ENV, "env-key");

    let mut config = TomlConfig::default();
    config.oracle.api_key = Some("toml-key".to_string());

    assert_eq!(resolve_oracle_api_key(&config).as_deref(), Some("env-key"));

    env::remove_var(ORACLE_API_KEY_ENV);
}

#[test]
#[serial]
fn test_toml_key_used_when_env_missing() {
    env::remove_var(ORACLE_API_KEY_ENV);

    let mut config = TomlConfig::default();
    config.oracle.api_key = Some("toml-key".to_string());

    assert_eq!(resolve_oracle_api_key(&config).as_deref(), Some("toml-key"));
}

#[test]
#[serial]
fn test_blank_keys_are_ignored() {
    env::set_var(ORACLE_API_KEY_ENV, "   ");

    let mut config = TomlConfig::default();
    config.oracle.api_key = Some(String::new());

    assert_eq!(resolve_oracle_api_key(&config), None);

    env::remove_var(ORACLE_API_KEY_ENV);
}
