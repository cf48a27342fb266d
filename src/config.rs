//! Configuration management for filewm
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `FILEWM_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::storage::ListingMode;

const CONFIG_FILE: &str = "config";
const ENV_PREFIX: &str = "FILEWM";

/// Server configuration, loaded once at startup
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Sandbox root; every operation is confined to this directory
    pub server_root: String,

    /// Default listing shape when a request does not ask for one
    pub listing_mode: ListingMode,

    /// Maximum upload body size in MB
    pub max_upload_size_mb: u64,

    /// Whether set-password and toggle-protection go through the access gate
    pub settings_require_auth: bool,

    /// When set, protection starts enabled with this password
    #[serde(default)]
    pub initial_password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            server_root: "./uploads".to_string(),
            listing_mode: ListingMode::Recursive,
            max_upload_size_mb: 100,
            settings_require_auth: true,
            initial_password: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from the given file stem (extension is optional)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", defaults.port as i64)?
            .set_default("server_root", defaults.server_root)?
            .set_default("listing_mode", defaults.listing_mode.as_str())?
            .set_default("max_upload_size_mb", defaults.max_upload_size_mb as i64)?
            .set_default("settings_require_auth", defaults.settings_require_auth)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.server_root.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "server_root cannot be empty".into(),
            ));
        }

        if self.max_upload_size_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_upload_size_mb must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get server root as PathBuf
    pub fn server_root_path(&self) -> PathBuf {
        PathBuf::from(&self.server_root)
    }

    /// Get maximum upload size in bytes
    pub fn max_upload_size_bytes(&self) -> usize {
        (self.max_upload_size_mb as usize).saturating_mul(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let stem = dir.path().join("absent");
        let config = ServerConfig::load_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.server_root, "./uploads");
        assert_eq!(config.listing_mode, ListingMode::Recursive);
        assert!(config.settings_require_auth);
        assert_eq!(config.initial_password, None);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("filewm.toml");
        fs::write(
            &file,
            "port = 9090\nserver_root = \"/srv/share\"\nlisting_mode = \"shallow\"\ninitial_password = \"hunter2\"\n",
        )
        .unwrap();

        let config = ServerConfig::load_from(file.to_str().unwrap()).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.server_root_path(), PathBuf::from("/srv/share"));
        assert_eq!(config.listing_mode, ListingMode::Shallow);
        assert_eq!(config.listen_socket(), "0.0.0.0:9090");
        assert_eq!(config.initial_password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn rejects_zero_port() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_blank_root() {
        let config = ServerConfig {
            server_root: "  ".into(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
