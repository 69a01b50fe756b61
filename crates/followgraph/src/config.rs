//! Configuration file for the followgraph command line.
//!
//! Every field has a default, so a missing file or a partial one is fine:
//!
//! ```yaml
//! database: followgraph.db
//! session_file: session.yaml
//! workers: 2
//! endpoint:
//!   base_url: https://x.com/i/api
//!   page_size: 100
//!   timeout_secs: 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{Error, Result};
use crate::fetch::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "followgraph.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the `SQLite` graph database
    pub database: PathBuf,
    /// Path of the YAML session file (headers and cookies)
    pub session_file: PathBuf,
    /// Maximum number of branches crawled at the same time
    pub workers: usize,
    /// Remote listing endpoint
    pub endpoint: EndpointConfig,
}

/// Remote listing endpoint section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointConfig {
    /// Base URL of the API, without the listing path
    pub base_url: String,
    /// Accounts requested per page
    pub page_size: u32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("followgraph.db"),
            session_file: PathBuf::from("session.yaml"),
            workers: 2,
            endpoint: EndpointConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: 30,
        }
    }
}

impl EndpointConfig {
    /// Per-request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file is not valid YAML, has unknown
    /// keys, or holds out-of-range values, and [`Error::Io`] if it exists but
    /// cannot be read.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to `path` as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check values serde cannot express constraints for.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".to_string()));
        }
        if self.endpoint.page_size == 0 {
            return Err(Error::Config(
                "endpoint.page_size must be at least 1".to_string(),
            ));
        }
        if self.endpoint.base_url.trim().is_empty() {
            return Err(Error::Config("endpoint.base_url is empty".to_string()));
        }
        Ok(())
    }
}
