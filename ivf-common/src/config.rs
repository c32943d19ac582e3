//! Bootstrap configuration loading
//!
//! Settings resolve in priority order:
//! 1. Command-line arguments (handled by the binary)
//! 2. Environment variables
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing TOML file is not an error: the service logs a warning and runs
//! on defaults. A TOML file that exists but does not parse is a
//! [`Error::Config`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable holding the oracle credential
pub const ORACLE_API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

const APP_DIR: &str = "influencer-verifier";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// HTTP server port
    pub port: u16,
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// SQLite database file; defaults to the platform data directory
    pub database_path: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub oracle: OracleConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            bind_address: "127.0.0.1".to_string(),
            database_path: None,
            logging: LoggingConfig::default(),
            oracle: OracleConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` overrides
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Chat-completion oracle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Credential; the environment variable takes precedence
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Transport timeout per request
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.perplexity.ai".to_string(),
            model: "sonar-pro".to_string(),
            max_tokens: 4000,
            temperature: 0.1,
            timeout_secs: 120,
        }
    }
}

/// Inbound request rate limit, applied per client IP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

/// Cross-origin policy for the dashboard front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:5174".to_string(),
                "http://localhost:3000".to_string(),
                "http://localhost:4173".to_string(),
            ],
        }
    }
}

/// Default config file location: `<config_dir>/influencer-verifier/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Default database location: `<data_local_dir>/influencer-verifier/influencers.db`
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./influencer_verifier_data"))
        .join("influencers.db")
}

/// Load the TOML config from `path`, or the default location when `None`
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => {
            warn!("Could not determine config directory, using defaults");
            return Ok(TomlConfig::default());
        }
    };

    if !path.exists() {
        warn!("Config file not found: {} (using defaults)", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(config)
}

/// Resolve the oracle credential
///
/// **Priority:** ENV (`PERPLEXITY_API_KEY`) → TOML `oracle.api_key`
///
/// Returns `None` when no usable key is configured. That is a handled
/// condition: resolution falls back to the unknown record, verification
/// reports a configuration error.
pub fn resolve_oracle_api_key(toml_config: &TomlConfig) -> Option<String> {
    let env_key = std::env::var(ORACLE_API_KEY_ENV)
        .ok()
        .filter(|k| is_valid_key(k));
    let toml_key = toml_config
        .oracle
        .api_key
        .clone()
        .filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "Oracle API key found in both environment and TOML. Using environment (highest priority)."
        );
    }

    if let Some(key) = env_key {
        info!(key_len = key.len(), "Oracle API key loaded from environment variable");
        return Some(key);
    }

    if let Some(key) = toml_key {
        info!(key_len = key.len(), "Oracle API key loaded from TOML config");
        return Some(key);
    }

    warn!(
        "Oracle API key not configured (set {} or oracle.api_key in the TOML config)",
        ORACLE_API_KEY_ENV
    );
    None
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
