//! Application configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable prefix shared by every configuration source.
const ENV_PREFIX: &str = "MOVIENIGHT";

/// Store service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Client configuration.
    #[serde(default)]
    pub client: ClientConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the movie store endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// File the session identity is persisted to.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            session_file: default_session_file(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_min_connections() -> u32 {
    1
}

fn default_api_url() -> String {
    "http://127.0.0.1:3000/".to_string()
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".movienight/session.json")
}

fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
    // A missing .env file is the normal case outside development.
    dotenvy::dotenv().ok();

    let env = std::env::var(format!("{ENV_PREFIX}_ENV"))
        .unwrap_or_else(|_| "development".to_string());

    config::Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{env}")).required(false))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (via `dotenvy`, if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `MOVIENIGHT_ENV`)
    /// 4. Environment variables with `MOVIENIGHT__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        builder().add_source(environment()).build()?.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}
