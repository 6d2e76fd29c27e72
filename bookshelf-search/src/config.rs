//! Catalog client configuration with sensible defaults.
//!
//! [`ClientConfig`] holds the backend base address and request behaviour.
//! Loading it from files or the environment is the host's job.

use crate::error::SearchError;
use url::Url;

/// Default catalog API base address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Configuration for talking to the catalog backend.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the catalog API. Requests go to `{base_url}/books`.
    pub base_url: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, `bookshelf/<version>` is sent.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: 30,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Set a custom base address.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must parse as an absolute `http` or `https` URL
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            SearchError::Config(format!("invalid base_url {:?}: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SearchError::Config(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Endpoint for the `books` collection, tolerating a trailing slash on the base.
    pub(crate) fn books_endpoint(&self) -> String {
        format!("{}/books", self.base_url.trim_end_matches('/'))
    }
}
