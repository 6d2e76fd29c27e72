//! Shared HTTP client for catalog requests.

use crate::config::ClientConfig;
use crate::error::SearchError;
use std::time::Duration;

/// User-Agent sent when the config does not set one.
pub const DEFAULT_USER_AGENT: &str = concat!("bookshelf/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for the catalog API.
///
/// The client has:
/// - Timeout from config
/// - Custom User-Agent if configured, [`DEFAULT_USER_AGENT`] otherwise
/// - Redirects followed (up to 10)
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the client cannot be constructed.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}
