//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and a `.env` file when present) on top of defaults.
//!
//! memU credentials are intentionally not part of this structure: they are
//! resolved on every tool call, see `domains::memu::Credentials`.

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use super::error::{Error, Result};

/// Default memU API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.memu.so";

/// Default agent identifier for this integration.
pub const DEFAULT_AGENT_ID: &str = "mcp_assistant";

/// Default agent display name for this integration.
pub const DEFAULT_AGENT_NAME: &str = "MCP Assistant";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// memU API endpoint and agent identity.
    pub memu: MemuConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// memU API configuration.
///
/// These values are immutable for the process lifetime and injected into
/// the client at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemuConfig {
    /// Base URL all API paths are resolved against.
    pub base_url: String,

    /// Agent identifier sent with every scoped request.
    pub agent_id: String,

    /// Agent display name sent with memorize requests.
    pub agent_name: String,
}

impl Default for MemuConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            agent_id: DEFAULT_AGENT_ID.to_string(),
            agent_name: DEFAULT_AGENT_NAME.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "memu-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            memu: MemuConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_LOG_TIMESTAMPS`); API settings use the `MEMU_`
    /// prefix (`MEMU_BASE_URL`, `MEMU_AGENT_ID`, `MEMU_AGENT_NAME`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        if let Ok(base_url) = std::env::var("MEMU_BASE_URL") {
            info!("Using memU base URL from environment: {}", base_url);
            config.memu.base_url = base_url;
        }

        if let Ok(agent_id) = std::env::var("MEMU_AGENT_ID") {
            config.memu.agent_id = agent_id;
        }

        if let Ok(agent_name) = std::env::var("MEMU_AGENT_NAME") {
            config.memu.agent_name = agent_name;
        }

        config
    }

    /// Check the configuration for values that make every tool unusable.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.memu.base_url)
            .map_err(|e| Error::config(format!("invalid MEMU_BASE_URL '{}': {}", self.memu.base_url, e)))?;

        if self.memu.agent_id.trim().is_empty() {
            return Err(Error::config("MEMU_AGENT_ID must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_memu_settings_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MEMU_BASE_URL", "http://127.0.0.1:9999");
            std::env::set_var("MEMU_AGENT_ID", "custom_agent");
        }
        let config = Config::from_env();
        assert_eq!(config.memu.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.memu.agent_id, "custom_agent");
        assert_eq!(config.memu.agent_name, DEFAULT_AGENT_NAME);
        unsafe {
            std::env::remove_var("MEMU_BASE_URL");
            std::env::remove_var("MEMU_AGENT_ID");
        }
    }

    #[test]
    fn test_memu_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MEMU_BASE_URL");
        }
        let config = Config::from_env();
        assert_eq!(config.memu.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_log_timestamps_disabled() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_TIMESTAMPS", "false");
        }
        let config = Config::from_env();
        assert!(!config.logging.with_timestamps);
        unsafe {
            std::env::remove_var("MCP_LOG_TIMESTAMPS");
        }
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.memu.base_url = "api.memu.so".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("MEMU_BASE_URL"));
    }

    #[test]
    fn test_validate_rejects_empty_agent_id() {
        let mut config = Config::default();
        config.memu.agent_id = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }
}
