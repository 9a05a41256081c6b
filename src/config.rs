//! Client configuration.
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! explicit overrides (the CLI feeds flags and `ESTOC_*` environment variables
//! in as overrides).

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{EstocError, Result};

/// Default cluster address.
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a search cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the cluster, including scheme and port.
    pub url: String,
    /// Username for basic authentication.
    pub username: Option<String>,
    /// Password for basic authentication.
    pub password: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            url: DEFAULT_URL.to_string(),
            username: None,
            password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at the given URL.
    pub fn new<S: Into<String>>(url: S) -> Self {
        ClientConfig {
            url: url.into(),
            ..ClientConfig::default()
        }
    }

    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set basic authentication credentials.
    pub fn with_credentials<U: Into<String>, P: Into<String>>(
        mut self,
        username: U,
        password: P,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Apply overrides on top of this configuration. `None` keeps the current value.
    pub fn merge(
        mut self,
        url: Option<String>,
        username: Option<String>,
        password: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = url {
            self.url = url;
        }
        if username.is_some() {
            self.username = username;
        }
        if password.is_some() {
            self.password = password;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse the base URL, normalised to end with a slash so relative
    /// endpoint paths join underneath it.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.url.trim().to_string();
        if raw.is_empty() {
            return Err(EstocError::config("cluster url is empty"));
        }
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)
            .map_err(|e| EstocError::config(format!("invalid cluster url '{}': {e}", self.url)))?;
        if url.cannot_be_a_base() {
            return Err(EstocError::config(format!(
                "cluster url '{}' cannot be used as a base",
                self.url
            )));
        }
        Ok(url)
    }

    /// Check the configuration for obvious mistakes.
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.timeout_secs == 0 {
            return Err(EstocError::config("timeout_secs must be greater than zero"));
        }
        if self.password.is_some() && self.username.is_none() {
            return Err(EstocError::config("password given without a username"));
        }
        Ok(())
    }
}
