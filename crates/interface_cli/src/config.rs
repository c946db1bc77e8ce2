//! Store configuration
//!
//! Values come from `PWPOLICY_`-prefixed environment variables (after
//! `.env` is loaded by the binary). Every field has a default.

use serde::Deserialize;
use std::time::Duration;

use core_kernel::CoreError;
use infra_db::DatabaseConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PWPOLICY";

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, one event per line
    Pretty,
    /// One JSON object per event
    Json,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connect_timeout_secs: u64,
    /// Default log filter, overridden by RUST_LOG
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/password_policies".to_string(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 30,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from an environment source
    pub fn from_environment(source: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// Checks values that deserialize fine but cannot work together
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.database_url.trim().is_empty() {
            return Err(CoreError::configuration("database_url must not be empty"));
        }
        if self.max_connections == 0 {
            return Err(CoreError::configuration("max_connections must be at least 1"));
        }
        if self.min_connections > self.max_connections {
            return Err(CoreError::configuration(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }

    /// Pool settings derived from this configuration
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}
