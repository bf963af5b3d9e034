use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::services::CatalogSource;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub drafts: DraftSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Where the static catalog comes from. A URL wins over a path when both are set.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            url: None,
            timeout_secs: None,
        }
    }
}

impl CatalogSettings {
    pub fn source(&self) -> CatalogSource {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => CatalogSource::Url(url.to_string()),
            _ => CatalogSource::File(self.path.clone()),
        }
    }
}

fn default_catalog_path() -> PathBuf { PathBuf::from("data/catalog.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct DraftSettings {
    #[serde(default = "default_autosave_interval")]
    pub autosave_interval_secs: u64,
    #[serde(default = "default_store_capacity")]
    pub capacity: u64,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            autosave_interval_secs: default_autosave_interval(),
            capacity: default_store_capacity(),
        }
    }
}

fn default_autosave_interval() -> u64 { 30 }
fn default_store_capacity() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { namespace: default_namespace() }
    }
}

fn default_namespace() -> String { "ami".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FINDER_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FINDER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Honour the short `CATALOG_PATH` / `CATALOG_URL` variables used by deployment scripts.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(path) = env::var("CATALOG_PATH") {
        builder = builder.set_override("catalog.path", path)?;
    }
    if let Ok(url) = env::var("CATALOG_URL") {
        builder = builder.set_override("catalog.url", url)?;
    }

    builder.build()
}
