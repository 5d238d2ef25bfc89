//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use sqlx::postgres::PgConnectOptions;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    /// Postgres connection settings
    pub database: DatabaseConfig,
    /// Apply the bundled migrations at startup
    pub run_migrations: bool,
    /// Insert demo routines and a sample week when the catalog is empty
    pub seed_demo_data: bool,
}

/// Postgres connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            name: "swole_db".to_string(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl DatabaseConfig {
    /// Connection options for the pool. TLS is not negotiated.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(sqlx::postgres::PgSslMode::Disable)
    }
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            cors_origins: Vec::new(),
            database: DatabaseConfig::default(),
            run_migrations: false,
            seed_demo_data: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = DatabaseConfig::default();

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            cors_origins: parse_origins(&env::var("CORS_ORIGINS").unwrap_or_default()),
            database: DatabaseConfig {
                host: env::var("DB_HOST").unwrap_or(defaults.host),
                port: parse_var("DB_PORT", defaults.port)?,
                user: env::var("DB_USER").unwrap_or(defaults.user),
                password: env::var("DB_PASSWORD").unwrap_or(defaults.password),
                name: env::var("DB_NAME").unwrap_or(defaults.name),
                max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.max_connections)?,
                acquire_timeout: Duration::from_secs(parse_var(
                    "DB_ACQUIRE_TIMEOUT_SECS",
                    defaults.acquire_timeout.as_secs(),
                )?),
            },
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
            seed_demo_data: parse_var("SEED_DEMO_DATA", true)?,
        })
    }
}

/// Read `name`, falling back to `default` when unset or blank.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        _ => Ok(default),
    }
}

/// `*` or an empty value allows any origin.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(ToString::to_string)
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
