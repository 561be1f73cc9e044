//! Gallery configuration: defaults, an optional TOML file, then environment overrides.

use std::path::Path;
use std::time::Duration;

use picsum_api::{Client, DEFAULT_BASE_URL, DEFAULT_LIMIT};
use serde::Deserialize;

use crate::error::GalleryError;
use crate::validation;

pub const ENV_BASE_URL: &str = "PICSUM_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "PICSUM_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "PICSUM_TIMEOUT_SECS";

/// Settings shared by the loaders and the catalog client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Catalog host, e.g. `https://picsum.photos`.
    pub base_url: String,
    /// Photos requested per page.
    pub page_size: u32,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_LIMIT,
            timeout_secs: 30,
        }
    }
}

impl GalleryConfig {
    /// Loads defaults, then `path` if given, then environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, GalleryError> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    GalleryError::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        let config = config.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, GalleryError> {
        toml::from_str(content).map_err(|e| GalleryError::Config(e.to_string()))
    }

    /// Applies `PICSUM_*` overrides looked up through `lookup`. Values that do
    /// not parse are ignored with a warning.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(page_size) = parse_var(&lookup, ENV_PAGE_SIZE) {
            self.page_size = page_size;
        }
        if let Some(timeout) = parse_var(&lookup, ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout;
        }
        self
    }

    pub fn validate(&self) -> Result<(), GalleryError> {
        validation::validate_page_size(self.page_size)?;
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(GalleryError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(GalleryError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds a catalog client for this configuration.
    pub fn client(&self) -> Client {
        Client::with_base_url(&self.base_url).with_timeout(self.timeout())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}
