//! Client configuration
//!
//! Values are layered: built-in defaults, then an optional config file, then
//! `PORTAL_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use common::routes::DEFAULT_BASE_URL;
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::error::ClientResult;

/// File looked up when `PORTAL_CONFIG` is not set (`portal.toml`, `portal.json`, ...)
pub const DEFAULT_CONFIG_FILE: &str = "portal";

/// Configuration for the backend client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Backend root, including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for ordinary calls, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Timeout for file uploads, in seconds
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,
    /// Where a file-backed session is kept
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    /// Redis URL for a shared session store
    #[serde(default)]
    pub redis_url: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_upload_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            upload_timeout_secs: default_upload_timeout_secs(),
            session_file: None,
            redis_url: None,
        }
    }
}

impl ClientConfig {
    /// Load the configuration from the environment
    ///
    /// # Environment Variables
    /// - `PORTAL_CONFIG`: config file to read (default: `portal`, any supported extension)
    /// - `PORTAL_BASE_URL`: backend root (default: "http://localhost:8090/api")
    /// - `PORTAL_TIMEOUT_SECS`: call timeout (default: 15)
    /// - `PORTAL_UPLOAD_TIMEOUT_SECS`: upload timeout (default: 30)
    /// - `PORTAL_SESSION_FILE`: session file path
    /// - `PORTAL_REDIS_URL`: Redis URL for the session store
    pub fn from_env() -> ClientResult<Self> {
        let file =
            std::env::var("PORTAL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load(&file)
    }

    /// Load the configuration from `file` (if it exists) and the environment
    pub fn load(file: &str) -> ClientResult<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("PORTAL"))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        info!("Client configured for {}", config.base_url);
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "PORTAL_BASE_URL",
        "PORTAL_TIMEOUT_SECS",
        "PORTAL_UPLOAD_TIMEOUT_SECS",
        "PORTAL_SESSION_FILE",
        "PORTAL_REDIS_URL",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
    }

    fn missing_file() -> String {
        std::env::temp_dir()
            .join(format!("portal-missing-{}", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    #[serial]
    fn test_defaults_without_file_or_env() {
        clear_env();
        let config = ClientConfig::load(&missing_file()).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:8090/api");
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.upload_timeout(), Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("PORTAL_BASE_URL", "https://portal.example.com/api");
            std::env::set_var("PORTAL_TIMEOUT_SECS", "5");
        }

        let config = ClientConfig::load(&missing_file()).unwrap();
        assert_eq!(config.base_url, "https://portal.example.com/api");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.upload_timeout_secs, 30);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_file_then_env() {
        clear_env();
        let path = std::env::temp_dir().join(format!("portal-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "base_url = \"http://backend:8090/api\"\nupload_timeout_secs = 60\nsession_file = \"/tmp/portal-session.json\"\n",
        )
        .unwrap();
        unsafe { std::env::set_var("PORTAL_UPLOAD_TIMEOUT_SECS", "90") };

        let config = ClientConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.base_url, "http://backend:8090/api");
        assert_eq!(config.upload_timeout_secs, 90);
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/portal-session.json"))
        );

        clear_env();
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    #[serial]
    fn test_invalid_value_is_a_config_error() {
        clear_env();
        unsafe { std::env::set_var("PORTAL_TIMEOUT_SECS", "soon") };

        let err = ClientConfig::load(&missing_file()).unwrap_err();
        assert!(matches!(err, crate::error::ClientError::Config(_)));

        clear_env();
    }
}
