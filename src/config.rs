//! Configuration module for loading and parsing TOML configuration files.

use crate::models::CompanySummary;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "LIBRARY_CONFIG";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Companies listed on the candle dashboard.
    #[serde(default = "default_companies")]
    pub companies: Vec<CompanyConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string. Without one the in-memory store is used.
    pub url: Option<String>,
    /// Maximum pooled connections.
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before failing a request.
    pub acquire_timeout_secs: u64,
    /// Whether to apply embedded migrations at startup.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 5,
            run_migrations: true,
        }
    }
}

/// Dashboard company entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CompanyConfig {
    /// Display name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
}

impl From<&CompanyConfig> for CompanySummary {
    fn from(company: &CompanyConfig) -> Self {
        Self {
            name: company.name.clone(),
            symbol: company.symbol.clone(),
        }
    }
}

fn default_companies() -> Vec<CompanyConfig> {
    [
        ("Apple", "AAPL"),
        ("Google", "GOOGL"),
        ("Microsoft", "MSFT"),
        ("Amazon", "AMZN"),
    ]
    .into_iter()
    .map(|(name, symbol)| CompanyConfig {
        name: name.to_string(),
        symbol: symbol.to_string(),
    })
    .collect()
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the effective configuration from the process environment.
    ///
    /// Reads the file named by `LIBRARY_CONFIG` when set, otherwise starts from
    /// defaults, then applies `HOST`, `PORT` and `DATABASE_URL` overrides.
    ///
    /// # Errors
    /// Returns error if the file cannot be loaded or an override is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT must be a number: {}", port)))?;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = Some(url);
        }

        config.validate()?;
        Ok(config)
    }

    /// Returns the dashboard company list.
    #[must_use]
    pub fn company_summaries(&self) -> Vec<CompanySummary> {
        self.companies.iter().map(CompanySummary::from).collect()
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue(
                "server port must be non-zero".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "database max_connections must be positive".to_string(),
            ));
        }

        if let Some(url) = &self.database.url
            && url.trim().is_empty()
        {
            return Err(ConfigError::InvalidValue(
                "database url cannot be empty".to_string(),
            ));
        }

        let mut symbols = HashSet::new();
        for company in &self.companies {
            if company.name.is_empty() || company.symbol.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "company name and symbol cannot be empty".to_string(),
                ));
            }
            if !symbols.insert(company.symbol.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "company symbol {} is listed twice",
                    company.symbol
                )));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            companies: default_companies(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 3000

[database]
url = "postgres://localhost:5432/lmsdb"
max_connections = 4
acquire_timeout_secs = 2

[[companies]]
name = "Apple"
symbol = "AAPL"

[[companies]]
name = "Tesla"
symbol = "TSLA"
"#;

        let config = Config::parse(toml_content).expect("should parse");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost:5432/lmsdb")
        );
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.acquire_timeout_secs, 2);
        assert!(config.database.run_migrations);
        assert_eq!(config.companies.len(), 2);
        assert_eq!(config.companies[1].symbol, "TSLA");
    }

    #[test]
    fn test_parse_example_config() {
        let config = Config::parse(include_str!("../config/library.example.toml"))
            .expect("example config should parse");
        assert!(config.database.url.is_some());
        assert_eq!(config.company_summaries(), Config::default().company_summaries());
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::parse("").expect("should parse");
        assert_eq!(config.server.port, 8080);
        assert!(config.database.url.is_none());
        assert_eq!(config.companies.len(), 4);
    }

    #[test]
    fn test_default_companies() {
        let symbols: Vec<String> = Config::default()
            .company_summaries()
            .into_iter()
            .map(|c| c.symbol)
            .collect();
        assert_eq!(symbols, vec!["AAPL", "GOOGL", "MSFT", "AMZN"]);
    }

    #[test]
    fn test_validation_duplicate_symbol() {
        let mut config = Config::default();
        config.companies.push(CompanyConfig {
            name: "Apple Again".to_string(),
            symbol: "AAPL".to_string(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_url() {
        let mut config = Config::default();
        config.database.url = Some("  ".to_string());
        assert!(config.validate().is_err());
    }
}
