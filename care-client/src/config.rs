//! Portal configuration

use std::path::PathBuf;

/// Default webhook base of a local n8n instance
pub const DEFAULT_WEBHOOK_BASE: &str = "http://localhost:5678/webhook";

/// Default on-disk data directory
pub const DEFAULT_DATA_DIR: &str = "jiscare-data";

/// Configuration for the portal core
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Webhook base URL (e.g. "http://localhost:5678/webhook")
    pub webhook_base: String,

    /// Directory holding the local cache database
    pub data_dir: PathBuf,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WEBHOOK_BASE)
    }
}

impl PortalConfig {
    /// Create a new configuration with defaults for everything but the
    /// webhook base.
    pub fn new(webhook_base: impl Into<String>) -> Self {
        Self {
            webhook_base: webhook_base.into(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout: 30,
        }
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a configuration from the environment:
    /// `JISCARE_WEBHOOK_BASE`, `JISCARE_DATA_DIR`, `JISCARE_HTTP_TIMEOUT`.
    /// Unset or unparseable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = std::env::var("JISCARE_WEBHOOK_BASE") {
            config.webhook_base = base;
        }
        if let Ok(dir) = std::env::var("JISCARE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(timeout) = std::env::var("JISCARE_HTTP_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        config
    }
}
