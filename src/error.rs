//! Error types for the bookshelf client.

use bookshelf_search::SearchError;

/// Top-level error type for the bookshelf client.
#[derive(Debug, thiserror::Error)]
pub enum BookshelfError {
    /// Configuration file or override error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Result rendering error.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Catalog request error.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, BookshelfError>;
