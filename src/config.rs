use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::clients::mobygames::MOBYGAMES_API;

pub const API_KEY_VAR: &str = "API_KEY";
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";

/// Signed session cookies need a 64 byte key.
pub const MIN_SECRET_KEY_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("{var} must be at least {min} bytes long")]
    SecretTooShort { var: &'static str, min: usize },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub catalog: CatalogConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Emit log lines as JSON instead of the human readable format
    pub log_json: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/gameshelf.db".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// Whether to set the Secure flag on session cookies.
    /// Leave off when serving plain HTTP on localhost, or the browser drops them.
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            secure_cookies: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub endpoint: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: MOBYGAMES_API.to_string(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

/// Credentials that only ever come from the environment.
#[derive(Clone)]
pub struct Secrets {
    pub api_key: String,
    pub secret_key: String,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("api_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Secrets {
    /// Reads `API_KEY` and `SECRET_KEY`, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = required_var(&lookup, API_KEY_VAR)?;
        let secret_key = required_var(&lookup, SECRET_KEY_VAR)?;

        if secret_key.len() < MIN_SECRET_KEY_LEN {
            return Err(ConfigError::SecretTooShort {
                var: SECRET_KEY_VAR,
                min: MIN_SECRET_KEY_LEN,
            });
        }

        Ok(Self {
            api_key,
            secret_key,
        })
    }
}

/// Just the catalog key, for commands that never open a session.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    dotenvy::dotenv().ok();
    required_var(&|name: &str| std::env::var(name).ok(), API_KEY_VAR)
}

fn required_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingEnv(name))
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("gameshelf").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".gameshelf").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "catalog.endpoint cannot be empty".to_string(),
            ));
        }

        if url::Url::parse(&self.catalog.endpoint).is_err() {
            return Err(ConfigError::Invalid(format!(
                "catalog.endpoint is not a valid URL: {}",
                self.catalog.endpoint
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, String)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.endpoint, "https://api.mobygames.com/v1/games");
        assert_eq!(config.catalog.request_timeout_seconds, 30);
        assert_eq!(config.general.database_path, "sqlite:data/gameshelf.db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[catalog]"));
        assert!(!toml_str.contains("api_key"));
        assert!(!toml_str.contains("secret_key"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [server]
            port = 8080
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.port, 8080);

        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.catalog.endpoint = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.catalog.endpoint = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_secrets_require_both_variables() {
        let secret = "s".repeat(MIN_SECRET_KEY_LEN);

        let vars = [(SECRET_KEY_VAR, secret.clone())];
        assert!(matches!(
            Secrets::from_lookup(lookup(&vars)),
            Err(ConfigError::MissingEnv("API_KEY"))
        ));

        let vars = [(API_KEY_VAR, "key".to_string())];
        assert!(matches!(
            Secrets::from_lookup(lookup(&vars)),
            Err(ConfigError::MissingEnv("SECRET_KEY"))
        ));

        let vars = [(API_KEY_VAR, "   ".to_string()), (SECRET_KEY_VAR, secret.clone())];
        assert!(matches!(
            Secrets::from_lookup(lookup(&vars)),
            Err(ConfigError::MissingEnv("API_KEY"))
        ));

        let vars = [(API_KEY_VAR, "key".to_string()), (SECRET_KEY_VAR, secret.clone())];
        let secrets = Secrets::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(secrets.api_key, "key");
        assert_eq!(secrets.secret_key, secret);
        assert!(!format!("{secrets:?}").contains(&secret));
    }

    #[test]
    fn test_secret_key_length() {
        let vars = [
            (API_KEY_VAR, "key".to_string()),
            (SECRET_KEY_VAR, "too-short".to_string()),
        ];
        assert!(matches!(
            Secrets::from_lookup(lookup(&vars)),
            Err(ConfigError::SecretTooShort { .. })
        ));
    }
}
