//! Client configuration.
//!
//! Use the builder pattern to customize client behavior.
//!
//! # Example
//!
//! ```ignore
//! use recipebox::config::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::default()
//!     .with_base_url("http://10.0.2.2:3000/api")
//!     .with_timeout(Duration::from_secs(5));
//! ```

use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL (all endpoint paths are relative to it).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default upper bound for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Data directory name under the home directory.
const DATA_DIR_NAME: &str = ".recipebox";

/// Configuration for the gateway, storage and user-data cache.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to (no trailing slash)
    pub base_url: String,
    /// Request timeout applied by the gateway and the reqwest adapter
    pub timeout: Duration,
    /// Directory holding the durable key-value file
    pub data_dir: PathBuf,
    /// Revert an optimistic favorite/bookmark change when its call fails
    pub rollback_on_failure: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            data_dir: default_data_dir(),
            rollback_on_failure: true,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing slash is stripped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Choose whether failed mutations roll back the local mirror.
    pub fn with_rollback_on_failure(mut self, rollback: bool) -> Self {
        self.rollback_on_failure = rollback;
        self
    }

    /// Create config from environment variables.
    ///
    /// - `RECIPEBOX_API_URL`: base URL
    /// - `RECIPEBOX_TIMEOUT_SECS`: request timeout in whole seconds
    /// - `RECIPEBOX_DATA_DIR`: storage directory
    /// - `RECIPEBOX_OPTIMISTIC_ONLY=1`: keep optimistic changes on failure
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("RECIPEBOX_API_URL") {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(raw) = std::env::var("RECIPEBOX_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_timeout(Duration::from_secs(secs)),
                _ => tracing::warn!("Ignoring invalid RECIPEBOX_TIMEOUT_SECS={:?}", raw),
            }
        }

        if let Ok(dir) = std::env::var("RECIPEBOX_DATA_DIR") {
            if !dir.trim().is_empty() {
                config = config.with_data_dir(dir.trim());
            }
        }

        if let Ok(flag) = std::env::var("RECIPEBOX_OPTIMISTIC_ONLY") {
            config = config.with_rollback_on_failure(!matches!(flag.trim(), "1" | "true"));
        }

        config
    }

    /// Path of the key-value file inside the data directory.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "RECIPEBOX_API_URL",
            "RECIPEBOX_TIMEOUT_SECS",
            "RECIPEBOX_DATA_DIR",
            "RECIPEBOX_OPTIMISTIC_ONLY",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.rollback_on_failure);
        assert!(config.store_path().ends_with("store.json"));
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let config = ClientConfig::new()
            .with_base_url("http://example.com/api/")
            .with_timeout(Duration::from_secs(3))
            .with_data_dir("/tmp/rb")
            .with_rollback_on_failure(false);
        assert_eq!(config.base_url, "http://example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.store_path(), PathBuf::from("/tmp/rb/store.json"));
        assert!(!config.rollback_on_failure);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        clear_env();
        std::env::set_var("RECIPEBOX_API_URL", "http://10.0.2.2:5000/api/");
        std::env::set_var("RECIPEBOX_TIMEOUT_SECS", "30");
        std::env::set_var("RECIPEBOX_DATA_DIR", "/tmp/recipebox-test");
        std::env::set_var("RECIPEBOX_OPTIMISTIC_ONLY", "1");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "http://10.0.2.2:5000/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/recipebox-test"));
        assert!(!config.rollback_on_failure);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_invalid_timeout() {
        clear_env();
        std::env::set_var("RECIPEBOX_TIMEOUT_SECS", "soon");
        assert_eq!(ClientConfig::from_env().timeout, DEFAULT_TIMEOUT);

        std::env::set_var("RECIPEBOX_TIMEOUT_SECS", "0");
        assert_eq!(ClientConfig::from_env().timeout, DEFAULT_TIMEOUT);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_without_variables_is_default() {
        clear_env();
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }
}
