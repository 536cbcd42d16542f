//! Server configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0:8080")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// SQLite database path
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Whether to enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// Allowed CORS origins
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ticklist")
        .join("ticklist.db")
}

fn default_enable_cors() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            database_path: default_database_path(),
            enable_cors: default_enable_cors(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional config file and environment
    /// variables. Environment takes precedence over the file, the file
    /// over defaults.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mut config = match Self::find_config_file() {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)?;
                toml::from_str(&contents)?
            }
            None => Self::default(),
        };

        if let Ok(addr) = std::env::var("TICKLIST_BIND_ADDRESS") {
            config.bind_address = addr;
        }

        if let Ok(path) = std::env::var("TICKLIST_DATABASE_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if let Ok(val) = std::env::var("TICKLIST_ENABLE_CORS") {
            config.enable_cors = val.parse().unwrap_or(true);
        }

        if let Ok(origins) = std::env::var("TICKLIST_CORS_ORIGINS") {
            config.cors_origins = origins.split(',').map(|s| s.trim().to_string()).collect();
        }

        if let Ok(level) = std::env::var("TICKLIST_LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let locations = [
            PathBuf::from("ticklist-server.toml"),
            PathBuf::from("/etc/ticklist/server.toml"),
            dirs::config_dir()
                .map(|p| p.join("ticklist").join("server.toml"))
                .unwrap_or_default(),
        ];

        locations.into_iter().find(|p| p.exists())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert!(config.enable_cors);
        assert_eq!(config.log_level, "info");
    }
}
