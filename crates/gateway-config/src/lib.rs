//! Configuration module for the FIX gateway.
//!
//! This module provides structures and utilities for managing gateway
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required configuration values are
//! properly set. Every field has a development-friendly default so the
//! gateway can start from an empty configuration.

use serde::{Deserialize, Serialize};
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

/// Main configuration structure for the FIX gateway.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
	/// Configuration for the venue session transport.
	#[serde(default)]
	pub session: SessionConfig,
	/// Configuration for the HTTP API server.
	#[serde(default)]
	pub api: ApiConfig,
}

/// Configuration for the venue session transport.
///
/// Mirrors the settings an initiator-style session needs: the two comp ids
/// identifying the parties, the connect endpoint, and the heartbeat cadence.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
	/// Transport implementation selector (e.g. "simulated").
	#[serde(default = "default_transport")]
	pub transport: String,
	/// Identifier this gateway presents to the venue.
	#[serde(default = "default_sender_comp_id")]
	pub sender_comp_id: String,
	/// Identifier of the venue counterparty.
	#[serde(default = "default_target_comp_id")]
	pub target_comp_id: String,
	/// Venue connect host.
	#[serde(default = "default_session_host")]
	pub host: String,
	/// Venue connect port.
	#[serde(default = "default_session_port")]
	pub port: u16,
	/// Session heartbeat interval in seconds.
	#[serde(default = "default_heartbeat_secs")]
	pub heartbeat_secs: u64,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			transport: default_transport(),
			sender_comp_id: default_sender_comp_id(),
			target_comp_id: default_target_comp_id(),
			host: default_session_host(),
			port: default_session_port(),
			heartbeat_secs: default_heartbeat_secs(),
		}
	}
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	#[serde(default = "default_api_host")]
	pub host: String,
	#[serde(default = "default_api_port")]
	pub port: u16,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			host: default_api_host(),
			port: default_api_port(),
		}
	}
}

fn default_transport() -> String {
	"simulated".to_string()
}

fn default_sender_comp_id() -> String {
	"GATEWAY".to_string()
}

fn default_target_comp_id() -> String {
	"VENUE".to_string()
}

fn default_session_host() -> String {
	"127.0.0.1".to_string()
}

fn default_session_port() -> u16 {
	9876
}

fn default_heartbeat_secs() -> u64 {
	30
}

fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
	8080
}

impl Config {
	/// Loads and validates configuration from a TOML file.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		Self::from_toml_str(&content)
	}

	/// Parses and validates configuration from a TOML string.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(content)?;
		config.validate()?;
		Ok(config)
	}

	/// Validates that all configuration values are usable.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.session.transport.trim().is_empty() {
			return Err(ConfigError::Validation(
				"session.transport must not be empty".to_string(),
			));
		}
		if self.session.sender_comp_id.trim().is_empty() {
			return Err(ConfigError::Validation(
				"session.sender_comp_id must not be empty".to_string(),
			));
		}
		if self.session.target_comp_id.trim().is_empty() {
			return Err(ConfigError::Validation(
				"session.target_comp_id must not be empty".to_string(),
			));
		}
		if self.session.host.trim().is_empty() {
			return Err(ConfigError::Validation(
				"session.host must not be empty".to_string(),
			));
		}
		if self.session.port == 0 {
			return Err(ConfigError::Validation(
				"session.port must be non-zero".to_string(),
			));
		}
		if self.session.heartbeat_secs == 0 {
			return Err(ConfigError::Validation(
				"session.heartbeat_secs must be non-zero".to_string(),
			));
		}
		if self.api.host.trim().is_empty() {
			return Err(ConfigError::Validation(
				"api.host must not be empty".to_string(),
			));
		}
		if self.api.port == 0 {
			return Err(ConfigError::Validation(
				"api.port must be non-zero".to_string(),
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
	fn parses_full_configuration() {
		let config = Config::from_toml_str(
			r#"
			[session]
			transport = "simulated"
			sender_comp_id = "BANZAI"
			target_comp_id = "EXEC"
			host = "fix.example.com"
			port = 9878
			heartbeat_secs = 20

			[api]
			host = "0.0.0.0"
			port = 8081
			"#,
		)
		.unwrap();

		assert_eq!(config.session.sender_comp_id, "BANZAI");
		assert_eq!(config.session.target_comp_id, "EXEC");
		assert_eq!(config.session.host, "fix.example.com");
		assert_eq!(config.session.port, 9878);
		assert_eq!(config.session.heartbeat_secs, 20);
		assert_eq!(config.api.port, 8081);
	}

	#[test]
	fn missing_sections_use_defaults() {
		let config = Config::from_toml_str("").unwrap();
		assert_eq!(config.session.transport, "simulated");
		assert_eq!(config.session.sender_comp_id, "GATEWAY");
		assert_eq!(config.api.host, "127.0.0.1");
		assert_eq!(config.api.port, 8080);
	}

	#[test]
	fn rejects_blank_comp_id() {
		let err = Config::from_toml_str(
			r#"
			[session]
			sender_comp_id = "  "
			"#,
		)
		.unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn rejects_zero_port() {
		let err = Config::from_toml_str(
			r#"
			[api]
			port = 0
			"#,
		)
		.unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn rejects_malformed_toml() {
		let err = Config::from_toml_str("session = ").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[tokio::test]
	async fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[session]\nsender_comp_id = \"FILECFG\"").unwrap();

		let config = Config::from_file(file.path()).await.unwrap();
		assert_eq!(config.session.sender_comp_id, "FILECFG");
	}

	#[tokio::test]
	async fn missing_file_is_an_io_error() {
		let err = Config::from_file("/nonexistent/gateway.toml")
			.await
			.unwrap_err();
		assert!(matches!(err, ConfigError::Io(_)));
	}
}
