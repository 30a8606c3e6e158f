use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::models::DEFAULT_LIMIT;

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.lightbnb/.env
pub fn load_dotenv() -> Result<()> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(format!("current directory ({})", path.display()));
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy doesn't overwrite existing vars
            match dotenvy::from_path(&env_file) {
                Ok(_) => {
                    loaded_from.push(format!("~/.lightbnb/.env ({})", env_file.display()));
                    debug!("Loaded .env from ~/.lightbnb: {}", env_file.display());
                }
                Err(e) => {
                    debug!("Failed to load ~/.lightbnb/.env: {}", e);
                }
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.lightbnb)");
    } else {
        info!("Loaded environment from: {}", loaded_from.join(", "));
    }

    Ok(())
}

/// Get the lightbnb config directory path (~/.lightbnb)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lightbnb"))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LightbnbConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub query: QueryConfig,
}

/// Connection settings for the PostgreSQL pool.
///
/// When `url` is set it wins over the discrete fields.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: None,
            max_connections: default_max_connections(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_database() -> String {
    "lightbnb".to_string()
}

fn default_user() -> String {
    "vagrant".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl DatabaseConfig {
    /// Build sqlx connect options from the configured URL or fields.
    pub fn connect_options(&self) -> Result<PgConnectOptions, GatewayError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url)
                .map_err(|e| GatewayError::Config(format!("invalid database url: {e}")));
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);

        if let Some(password) = &self.password {
            options = options.password(password);
        }

        Ok(options)
    }

    /// Override fields from `DATABASE_URL` and the libpq-style `PG*` variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.url = Some(url);
        }
        if let Some(host) = lookup("PGHOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PGPORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(e) => warn!("Ignoring PGPORT={}: {}", port, e),
            }
        }
        if let Some(database) = lookup("PGDATABASE") {
            self.database = database;
        }
        if let Some(user) = lookup("PGUSER") {
            self.user = user;
        }
        if let Some(password) = lookup("PGPASSWORD") {
            self.password = Some(password);
        }
        if let Some(max) = lookup("LIGHTBNB_MAX_CONNECTIONS") {
            match max.parse() {
                Ok(max) => self.max_connections = max,
                Err(e) => warn!("Ignoring LIGHTBNB_MAX_CONNECTIONS={}: {}", max, e),
            }
        }
    }
}

impl LightbnbConfig {
    /// Load config from TOML files and the environment
    ///
    /// Priority order (highest to lowest):
    /// 1. Environment variables (DATABASE_URL, PG*)
    /// 2. ./lightbnb.toml (project-specific)
    /// 3. ~/.lightbnb/config.toml (user defaults)
    /// 4. Built-in defaults
    pub fn load() -> Self {
        let mut config = LightbnbConfig::default();

        if let Some(global_config_path) = config_dir().map(|d| d.join("config.toml")) {
            if let Some(global_config) = Self::try_load(&global_config_path) {
                config = global_config;
            }
        }

        if let Some(local_config) = Self::try_load(Path::new("lightbnb.toml")) {
            config = local_config;
        }

        config
            .database
            .apply_env_overrides(|key| std::env::var(key).ok());

        config
    }

    /// Load config from an explicit TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))
    }

    fn try_load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match Self::from_file(path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("{:#}", e);
                None
            }
        }
    }
}
