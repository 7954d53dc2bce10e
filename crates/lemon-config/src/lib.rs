//! Configuration module for the fast-lemon-api service.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required configuration values are
//! properly set. Every value has a built-in default, so the service also
//! runs without a configuration file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
	/// Configuration for the HTTP server.
	#[serde(default)]
	pub server: ServerConfig,
	/// Configuration for the storage backend.
	#[serde(default)]
	pub storage: StorageConfig,
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
	/// Host address to bind the server to.
	#[serde(default = "default_host")]
	pub host: String,
	/// Port to bind the server to.
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

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	#[serde(default = "default_storage_primary")]
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	#[serde(default)]
	pub implementations: HashMap<String, toml::Value>,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			primary: default_storage_primary(),
			implementations: HashMap::new(),
		}
	}
}

impl StorageConfig {
	/// Returns the configuration table for the named implementation, or
	/// an empty table when none was provided.
	pub fn implementation_config(&self, name: &str) -> toml::Value {
		self.implementations
			.get(name)
			.cloned()
			.unwrap_or_else(|| toml::Value::Table(toml::map::Map::new()))
	}
}

/// Returns the default server host.
fn default_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default server port.
fn default_port() -> u16 {
	8000
}

/// Returns the default storage implementation name.
fn default_storage_primary() -> String {
	"memory".to_string()
}

impl Config {
	/// Loads configuration from a TOML file and validates it.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		let config: Config = toml::from_str(&contents)?;
		config.validate()?;
		Ok(config)
	}

	/// Validates the configuration values.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.server.host.is_empty() {
			return Err(ConfigError::Validation(
				"server.host must not be empty".to_string(),
			));
		}
		if self.server.port == 0 {
			return Err(ConfigError::Validation(
				"server.port must not be 0".to_string(),
			));
		}
		if self.storage.primary.is_empty() {
			return Err(ConfigError::Validation(
				"storage.primary must not be empty".to_string(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn defaults_bind_loopback_port_8000() {
		let config = Config::default();
		assert_eq!(config.server.host, "127.0.0.1");
		assert_eq!(config.server.port, 8000);
		assert_eq!(config.storage.primary, "memory");
		assert!(config.validate().is_ok());
	}

	#[test]
	fn loads_partial_file_and_fills_defaults() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"
[server]
port = 9100

[storage.implementations.memory]
"#
		)
		.unwrap();

		let config = Config::from_file(file.path()).unwrap();
		assert_eq!(config.server.host, "127.0.0.1");
		assert_eq!(config.server.port, 9100);
		assert_eq!(config.storage.primary, "memory");
		assert!(config
			.storage
			.implementation_config("memory")
			.as_table()
			.is_some());
	}

	#[test]
	fn rejects_invalid_toml() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "[server").unwrap();

		let err = Config::from_file(file.path()).unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn rejects_port_zero() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"
[server]
port = 0
"#
		)
		.unwrap();

		let err = Config::from_file(file.path()).unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn missing_implementation_table_yields_empty_table() {
		let config = Config::default();
		let value = config.storage.implementation_config("memory");
		assert_eq!(value, toml::Value::Table(toml::map::Map::new()));
	}
}
