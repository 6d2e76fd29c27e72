//! # bookshelf-search
//!
//! Search aggregation for the bookshelf catalog client.
//!
//! A single user query is sent to every catalog search class (title,
//! author, keyword, regex, with and without closeness ranking), the
//! per-class result lists are merged and deduplicated, and the outcome is
//! returned as named buckets ready for display.
//!
//! ## Design
//!
//! - Six independent catalog requests issued concurrently per query
//! - Stable dedup by book id, first occurrence wins
//! - Typed failures: a failed class is reported as unavailable, never as an
//!   empty result
//! - No ranking, caching, or pagination in this layer; ordering comes from
//!   the backend
//!
//! Queries are logged only at trace level.

pub mod aggregate;
pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use backend::{CatalogBackend, CatalogQuery};
pub use client::CatalogClient;
pub use config::ClientConfig;
pub use error::{Result, SearchError};
pub use types::{
    BookId, BookRecord, Bucket, BucketName, ImageSize, Person, SearchBuckets, SearchClass,
    SearchResultSet,
};

/// Search the catalog across every search class concurrently.
///
/// A missing query is treated as the empty string. Individual class failures
/// mark their bucket [`Bucket::Unavailable`] (or [`Bucket::Partial`] for a
/// merged bucket with one surviving source) and do not fail the search.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> bookshelf_search::Result<()> {
/// let config = bookshelf_search::ClientConfig::default();
/// let results = bookshelf_search::search(Some("whale"), &config).await?;
/// println!("{} title matches", results.data.books_by_title.len());
/// # Ok(())
/// # }
/// ```
pub async fn search(query: Option<&str>, config: &ClientConfig) -> Result<SearchResultSet> {
    let client = CatalogClient::new(config)?;
    Ok(aggregate::search::aggregate(&client, query).await)
}

/// Fetch a single book for the detail view.
///
/// # Errors
///
/// Returns [`SearchError::NotFound`] if the catalog has no book with `id`,
/// or any transport, decoding or config error.
pub async fn book(id: &BookId, config: &ClientConfig) -> Result<BookRecord> {
    let client = CatalogClient::new(config)?;
    client.by_id(id).await
}

/// Fetch books similar to the given ones, deduplicated by id.
///
/// # Errors
///
/// Returns any transport, decoding or config error.
pub async fn suggestions(terms: &[String], config: &ClientConfig) -> Result<Vec<BookRecord>> {
    let client = CatalogClient::new(config)?;
    let books = client.by_suggestions(terms).await?;
    Ok(aggregate::dedup::unique_books(books))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_validates_config_zero_timeout() {
        let config = ClientConfig::default().with_timeout(0);
        let result = search(Some("test"), &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn search_validates_config_bad_base_url() {
        let config = ClientConfig::default().with_base_url("nowhere");
        let result = search(None, &config).await;
        assert!(matches!(result, Err(SearchError::Config(_))));
    }

    #[tokio::test]
    async fn book_validates_config() {
        let config = ClientConfig::default().with_timeout(0);
        let result = book(&BookId::from(1), &config).await;
        assert!(matches!(result, Err(SearchError::Config(_))));
    }

    #[tokio::test]
    async fn suggestions_validates_config() {
        let config = ClientConfig::default().with_base_url("mailto:someone@example.com");
        let result = suggestions(&["1".to_owned()], &config).await;
        assert!(matches!(result, Err(SearchError::Config(_))));
    }
}
