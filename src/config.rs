//! Configuration management for the contact book server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file in the working directory is honored if present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default location of the flat contact file.
pub const DEFAULT_DATA_FILE: &str = "data/contacts.txt";

/// Default listen address (the bundled front end expects port 5000).
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Configuration for the contact book server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the comma-delimited contact file
    pub data_file: PathBuf,

    /// Socket address the HTTP server binds to
    pub bind_address: SocketAddr,

    /// Directory served as static content at `/`
    pub static_dir: PathBuf,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CONTACTS_DATA_FILE`: contact file path (default: `data/contacts.txt`)
    /// - `BIND_ADDRESS`: listen address (default: `127.0.0.1:5000`)
    /// - `STATIC_DIR`: static asset directory (default: `static`)
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Don't fail if there is no .env file
        let _ = dotenvy::dotenv();

        let data_file = env::var("CONTACTS_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));

        if data_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CONTACTS_DATA_FILE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let bind_address = Self::parse_socket_addr("BIND_ADDRESS", DEFAULT_BIND_ADDRESS)?;

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            data_file,
            bind_address,
            static_dir,
            log_level,
        })
    }

    /// Parse an environment variable as a socket address with a default value.
    fn parse_socket_addr(var_name: &str, default: &str) -> ConfigResult<SocketAddr> {
        let raw = env::var(var_name).unwrap_or_else(|_| default.to_string());
        raw.parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a socket address like 127.0.0.1:5000, got: {}", raw),
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 5000)),
            static_dir: PathBuf::from("static"),
            log_level: "info".to_string(),
        }
    }
}
