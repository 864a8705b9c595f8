//! Application configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock demo.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::store::Route;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Route written to the store at start-up.
    pub initial_route: Route,
    /// Delay before the EcoGuide answers.
    pub reply_delay_ms: u64,
    /// How long a toast stays visible.
    pub toast_ttl_ms: u64,
    /// Seed for reply selection. Taken from system entropy when unset.
    pub rng_seed: Option<u64>,
    pub featured_products: usize,
    pub community_highlights: usize,
    pub comparison_products: usize,
    /// YAML catalog to use instead of the built-in data.
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_route: Route::Home,
            reply_delay_ms: 1000,
            toast_ttl_ms: 3000,
            rng_seed: None,
            featured_products: 3,
            community_highlights: 2,
            comparison_products: 2,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        // serde_yaml reads an empty document as unit, not as an empty map
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&source)?;
        tracing::debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    /// The configured catalog file, or the built-in data.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(AppConfig::from_yaml_str("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::default().reply_delay(), Duration::from_secs(1));
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = AppConfig::from_yaml_str(
            "initial_route: community\nreply_delay_ms: 250\nrng_seed: 7\n",
        )
        .unwrap();
        assert_eq!(config.initial_route, Route::Community);
        assert_eq!(config.reply_delay_ms, 250);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.toast_ttl_ms, 3000);
    }

    #[test]
    fn unknown_route_is_rejected() {
        let err = AppConfig::from_yaml_str("initial_route: garden").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
