//! # configs
//!
//! Layered application settings: built-in defaults, then
//! `config/default.toml`, then the file named by `BOARD_CONFIG_FILE`, then
//! `BOARD__SECTION__KEY` environment variables. A `.env` file is read first
//! if present.

use std::path::PathBuf;

use config::{Config, Environment, File, Map};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an extra configuration file.
pub const CONFIG_FILE_ENV: &str = "BOARD_CONFIG_FILE";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    /// The `.env` file read by [`Settings::load`], if one was found.
    #[serde(skip)]
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub database_url: Option<SecretString>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    pub format: LogFormat,
}

impl Settings {
    /// Loads settings from the process environment and config files.
    pub fn load() -> Result<Self, SettingsError> {
        let env_file = dotenvy::dotenv().ok();
        let extra_file = std::env::var(CONFIG_FILE_ENV).ok();
        let mut settings = Self::build(extra_file.as_deref(), None)?;
        settings.env_file = env_file;
        Ok(settings)
    }

    /// Same layering as [`Settings::load`], with the environment replaced by
    /// `env` (keys like `BOARD__SERVER__PORT`).
    pub fn from_env_map(env: Map<String, String>) -> Result<Self, SettingsError> {
        Self::build(None, Some(env))
    }

    fn build(
        extra_file: Option<&str>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", Vec::<String>::new())?
            .set_default("storage.backend", "memory")?
            .set_default("storage.max_connections", 5)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name("config/default").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        let environment = Environment::with_prefix("BOARD")
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.cors_origins")
            .try_parsing(true)
            .source(env);

        let settings: Settings = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.server.port == 0 {
            return Err(SettingsError::Invalid("server.port must be non-zero".into()));
        }
        if self.storage.max_connections == 0 {
            return Err(SettingsError::Invalid(
                "storage.max_connections must be at least 1".into(),
            ));
        }
        if self.storage.backend == StorageBackend::Postgres {
            if cfg!(not(feature = "db-postgres")) {
                return Err(SettingsError::Invalid(
                    "storage.backend = postgres, but this build lacks the db-postgres feature"
                        .into(),
                ));
            }
            let has_url = self
                .storage
                .database_url
                .as_ref()
                .is_some_and(|url| !url.expose_secret().is_empty());
            if !has_url {
                return Err(SettingsError::Invalid(
                    "storage.database_url is required for the postgres backend".into(),
                ));
            }
        }
        Ok(())
    }
}
