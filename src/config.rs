//! Configuration management for the bookstore server

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

/// Top-level configuration, read from a flat JSON document:
/// `{"username", "password", "host", "port", "dbname"}` plus optional tuning keys.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub dbname: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings handed to the connection provider
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from the JSON file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(true))
            .build()?
            .try_deserialize()
    }

    /// Parse configuration from an in-memory JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize()
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            username: self.username.clone(),
            password: self.password.clone(),
            host: self.host.clone(),
            port: self.port,
            dbname: self.dbname.clone(),
            max_connections: self.max_connections,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.dbname)
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_json(
            r#"{"username": "books", "password": "secret", "host": "db",
                "port": "5432", "dbname": "bookstore"}"#,
        )
        .expect("config should parse");

        assert_eq!(config.port, 5432);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");

        let database = config.database();
        assert_eq!(database.connect_timeout, Duration::from_secs(5));
        let options = database.connect_options();
        assert_eq!(options.get_host(), "db");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_database(), Some("bookstore"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_json(
            r#"{
                "username": "books", "password": "secret", "host": "db",
                "port": 6543, "dbname": "bookstore",
                "max_connections": 3,
                "server": {"host": "127.0.0.1", "port": 9000},
                "logging": {"level": "debug"}
            }"#,
        )
        .expect("config should parse");

        assert_eq!(config.port, 6543);
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_database_key_is_rejected() {
        let result = AppConfig::from_json(r#"{"username": "books", "password": "secret"}"#);
        assert!(result.is_err());
    }
}
