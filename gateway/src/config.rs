//! Configuration for the inference gateway.

use std::time::Duration;

use config::builder::DefaultState;
use config::{Config as ConfigLoader, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Main configuration structure for the gateway.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Downstream inference backend connection profile.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    /// Bearer credential for the backend. Empty means none.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Hard limit on one generation call, connect through body.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: f64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl BackendConfig {
    /// The credential to send, if any. An empty key counts as absent.
    pub fn bearer_token(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Generation timeout. `timeout_seconds` is range-checked when loaded.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Model used when a request names none.
    #[serde(default = "default_model")]
    pub default: String,
    /// Models advertised by `/` and `/health`.
    #[serde(default = "default_available_models")]
    pub available: Vec<String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            default: default_model(),
            available: default_available_models(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_backend_url() -> String {
    "http://localhost:11434".to_string()
}
fn default_timeout_seconds() -> f64 {
    30.0
}
fn default_model() -> String {
    inference_common::DEFAULT_MODEL.to_string()
}
fn default_available_models() -> Vec<String> {
    vec!["llama3".to_string(), "mistral".to_string()]
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (GATEWAY__SECTION__KEY format)
    /// 2. config.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("GATEWAY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("models.available")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Parse configuration from a TOML document on top of the defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(File::from_str(source, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ConfigLoader::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("backend.base_url", default_backend_url())?
            .set_default("backend.timeout_seconds", default_timeout_seconds())?
            .set_default("models.default", default_model())?
            .set_default("logging.level", default_log_level())
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut config: Config = builder.build()?.try_deserialize()?;
        config.backend.base_url = config.backend.base_url.trim_end_matches('/').to_string();

        let timeout = config.backend.timeout_seconds;
        if Duration::try_from_secs_f64(timeout).is_err() || timeout <= 0.0 {
            return Err(ConfigError::Message(format!(
                "backend.timeout_seconds must be a positive number of seconds, got {}",
                timeout
            )));
        }

        Ok(config)
    }
}
