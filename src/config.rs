//! Configuration for the bookshelf client.
//!
//! Settings come from an optional TOML file, then environment overrides.
//! The catalog base address can always be set with `API_URI`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use bookshelf_search::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::error::{BookshelfError, Result};

/// Environment variable overriding `api.base_url`.
pub const API_URI_ENV: &str = "API_URI";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "BOOKSHELF_CONFIG_DIR";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookshelfConfig {
    /// Catalog API settings.
    pub api: ApiConfig,
}

/// Catalog API settings, the `[api]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base address of the catalog API, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            base_url: client.base_url,
            timeout_seconds: client.timeout_seconds,
            user_agent: client.user_agent,
        }
    }
}

impl ApiConfig {
    /// Client configuration for the search layer.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
        }
    }
}

impl BookshelfConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BookshelfError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BookshelfError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/bookshelf/config.toml`.
    ///
    /// The directory can be overridden with `BOOKSHELF_CONFIG_DIR`. `None`
    /// when neither the override nor a platform config directory exists.
    pub fn default_config_path() -> Option<PathBuf> {
        config_path_from(std::env::var_os(CONFIG_DIR_ENV), dirs::config_dir())
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// if present and defaults otherwise. Environment overrides are applied
    /// last and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed, or if the
    /// resulting API settings are invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(default_path) if default_path.is_file() => {
                    tracing::debug!(path = %default_path.display(), "loading default config");
                    Self::from_file(&default_path)?
                }
                Some(_) => Self::default(),
                None => {
                    tracing::debug!("no config directory; using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env_overrides();
        config.api.client_config().validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup(API_URI_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(base_url = %uri, "API_URI overrides configured base_url");
            self.api.base_url = uri.trim().to_owned();
        }
    }
}

fn config_path_from(
    override_dir: Option<OsString>,
    platform_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    let dir = match override_dir.filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => platform_dir?.join("bookshelf"),
    };
    Some(dir.join("config.toml"))
}
