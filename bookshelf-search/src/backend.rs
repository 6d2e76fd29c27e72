//! Trait definition for the catalog backend seam.
//!
//! [`CatalogBackend`] is what the aggregator fans out to. The HTTP client in
//! [`crate::client`] is the production implementation; tests substitute
//! in-memory backends.

use std::future::Future;

use crate::error::SearchError;
use crate::types::{BookId, BookRecord, SearchClass};

/// A list search against the catalog, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogQuery<'a> {
    Title(&'a str),
    Author(&'a str),
    Keyword { keyword: &'a str, ranked: bool },
    Regex { pattern: &'a str, ranked: bool },
    Suggestions(&'a [String]),
}

impl CatalogQuery<'_> {
    /// The search class this query belongs to.
    pub fn class(&self) -> SearchClass {
        match self {
            Self::Title(_) => SearchClass::Title,
            Self::Author(_) => SearchClass::Author,
            Self::Keyword { ranked, .. } => SearchClass::Keyword { ranked: *ranked },
            Self::Regex { ranked, .. } => SearchClass::Regex { ranked: *ranked },
            Self::Suggestions(_) => SearchClass::Suggestions,
        }
    }

    /// Query-string parameters for `GET /books`, not yet URL-encoded.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Title(title) => vec![("searchByTitle", (*title).to_owned())],
            Self::Author(author) => vec![("searchByAuthor", (*author).to_owned())],
            Self::Keyword { keyword, ranked } => vec![
                ("search", (*keyword).to_owned()),
                ("closeness", ranked.to_string()),
            ],
            Self::Regex { pattern, ranked } => vec![
                ("regex", (*pattern).to_owned()),
                ("closeness", ranked.to_string()),
            ],
            Self::Suggestions(terms) => vec![("suggestions", terms.join(","))],
        }
    }
}

/// A catalog that can answer every search class.
///
/// Implementors provide [`fetch`](Self::fetch) for list searches and
/// [`by_id`](Self::by_id) for single-book lookup; the per-class helpers are
/// derived from `fetch`. All implementations must be `Send + Sync` so the
/// aggregator can issue calls concurrently.
pub trait CatalogBackend: Send + Sync {
    /// Run one list search and return the books in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Transport`] if the request fails and
    /// [`SearchError::MalformedResponse`] if the body cannot be parsed.
    /// An empty list is a success.
    fn fetch(
        &self,
        query: CatalogQuery<'_>,
    ) -> impl Future<Output = Result<Vec<BookRecord>, SearchError>> + Send;

    /// Look up a single book.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotFound`] if the catalog has no such book, and
    /// the same errors as [`fetch`](Self::fetch) otherwise.
    fn by_id(&self, id: &BookId) -> impl Future<Output = Result<BookRecord, SearchError>> + Send;

    fn by_title(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<BookRecord>, SearchError>> + Send {
        self.fetch(CatalogQuery::Title(title))
    }

    fn by_author(
        &self,
        author: &str,
    ) -> impl Future<Output = Result<Vec<BookRecord>, SearchError>> + Send {
        self.fetch(CatalogQuery::Author(author))
    }

    /// `ranked` selects the backend's closeness-centrality order instead of
    /// plain keyword relevance.
    fn by_keyword(
        &self,
        keyword: &str,
        ranked: bool,
    ) -> impl Future<Output = Result<Vec<BookRecord>, SearchError>> + Send {
        self.fetch(CatalogQuery::Keyword { keyword, ranked })
    }

    /// Pattern matched against book content server-side; `ranked` as for
    /// [`by_keyword`](Self::by_keyword).
    fn by_regex(
        &self,
        pattern: &str,
        ranked: bool,
    ) -> impl Future<Output = Result<Vec<BookRecord>, SearchError>> + Send {
        self.fetch(CatalogQuery::Regex { pattern, ranked })
    }

    /// Books similar to the given ones.
    fn by_suggestions(
        &self,
        terms: &[String],
    ) -> impl Future<Output = Result<Vec<BookRecord>, SearchError>> + Send {
        self.fetch(CatalogQuery::Suggestions(terms))
    }
}
