//! Error types for the bookshelf-search crate.
//!
//! Every catalog call resolves to a typed result. A valid empty list is a
//! success, never an error, so callers can tell "no matches" apart from
//! "search unavailable".

/// Errors that can occur while talking to the catalog backend.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request never produced a successful response: connection, DNS,
    /// timeout, or a non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not JSON or did not match the book schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The backend has no book with the requested id.
    #[error("book not found: {0}")]
    NotFound(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for bookshelf-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
