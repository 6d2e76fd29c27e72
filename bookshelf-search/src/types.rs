//! Core types for catalog records, search classes, and aggregated result sets.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stable identity of a book in the catalog.
///
/// The backend emits integer ids; string ids are accepted too. Both forms are
/// normalised to the same textual representation, so `1` and `"1"` compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(String);

impl BookId {
    /// Returns the id as it appears in request paths.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for BookId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self(id.trim().to_owned())
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

impl Serialize for BookId {
    /// Canonical integers are written as numbers; anything else (`"007"`,
    /// `"+5"`, `"pg-84"`) stays a string so it reads back unchanged.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self::from(n),
            RawId::Text(s) => Self::from(s),
        })
    }
}

/// An author or translator credited on a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Name as stored by the catalog, usually `"Last, First"`.
    pub name: String,
}

impl Person {
    /// Display form of the name: the first `", "` becomes `"-"`.
    pub fn display_name(&self) -> String {
        self.name.replacen(", ", "-", 1)
    }
}

/// Sized image variants served by the catalog.
///
/// The size is a path segment of the image URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Thumbnail used in result lists.
    Small,
    /// Cover used in the detail view.
    Medium,
}

impl ImageSize {
    /// Path segment naming this size.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Small,
        }
    }
}

/// A single book as returned by every catalog search class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    /// Unique per book across all search classes.
    pub id: BookId,
    #[serde(default)]
    pub title: String,
    /// URI of a sized image variant.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub authors: Vec<Person>,
    #[serde(default)]
    pub translators: Vec<Person>,
    #[serde(default)]
    pub bookshelves: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    /// URI of the readable content.
    #[serde(default)]
    pub text: String,
}

impl BookRecord {
    /// Image URI rewritten to request `size`.
    ///
    /// Only the first occurrence of the other size segment is replaced; URIs
    /// without a size segment are returned unchanged.
    pub fn image_variant(&self, size: ImageSize) -> String {
        self.image.replacen(size.other().as_str(), size.as_str(), 1)
    }
}

/// One backend search class. Used for request dispatch and log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchClass {
    Title,
    Author,
    /// Full-text keyword match; `ranked` asks for closeness-centrality order.
    Keyword { ranked: bool },
    /// Pattern match over book content; `ranked` as for `Keyword`.
    Regex { ranked: bool },
    Suggestions,
    Id,
}

impl SearchClass {
    /// Returns a short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Keyword { ranked: false } => "keyword",
            Self::Keyword { ranked: true } => "ranked keyword",
            Self::Regex { ranked: false } => "regex",
            Self::Regex { ranked: true } => "ranked regex",
            Self::Suggestions => "suggestions",
            Self::Id => "id",
        }
    }
}

impl fmt::Display for SearchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one result bucket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Bucket {
    /// The search class answered. An empty list means "no matches".
    Available { books: Vec<BookRecord> },
    /// Some backend calls feeding this bucket failed; `books` holds what the
    /// others returned. An empty list here is not "no matches".
    Partial { books: Vec<BookRecord>, reason: String },
    /// Every backend call feeding this bucket failed.
    Unavailable { reason: String },
}

impl Bucket {
    /// Books in this bucket; empty when unavailable.
    pub fn books(&self) -> &[BookRecord] {
        match self {
            Self::Available { books } | Self::Partial { books, .. } => books,
            Self::Unavailable { .. } => &[],
        }
    }

    /// True unless every source failed. Partial buckets count as available.
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable { .. })
    }

    /// True when at least one source failed.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Self::Available { .. })
    }

    /// Failure description, if any source failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Available { .. } => None,
            Self::Partial { reason, .. } | Self::Unavailable { reason } => Some(reason),
        }
    }

    /// Number of books; zero when unavailable.
    pub fn len(&self) -> usize {
        self.books().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books().is_empty()
    }
}

/// Names of the buckets in a [`SearchResultSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketName {
    BooksByTitle,
    BooksByAuthor,
    BooksByKeywordOrRegex,
    BooksByKeywordOrRegexOrdered,
}

impl BucketName {
    /// Wire name of the bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BooksByTitle => "booksByTitle",
            Self::BooksByAuthor => "booksByAuthor",
            Self::BooksByKeywordOrRegex => "booksByKeywordOrRegex",
            Self::BooksByKeywordOrRegexOrdered => "booksByKeywordOrRegexOrdered",
        }
    }

    /// Returns all bucket names.
    pub fn all() -> &'static [BucketName] {
        &[
            Self::BooksByTitle,
            Self::BooksByAuthor,
            Self::BooksByKeywordOrRegex,
            Self::BooksByKeywordOrRegexOrdered,
        ]
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four buckets produced for one query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBuckets {
    pub books_by_title: Bucket,
    pub books_by_author: Bucket,
    pub books_by_keyword_or_regex: Bucket,
    pub books_by_keyword_or_regex_ordered: Bucket,
}

/// Aggregated results for one query, built fresh per request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResultSet {
    /// The query as sent to the backend.
    pub keyword: String,
    pub data: SearchBuckets,
}

impl SearchResultSet {
    /// Look up a bucket by name.
    pub fn bucket(&self, name: BucketName) -> &Bucket {
        match name {
            BucketName::BooksByTitle => &self.data.books_by_title,
            BucketName::BooksByAuthor => &self.data.books_by_author,
            BucketName::BooksByKeywordOrRegex => &self.data.books_by_keyword_or_regex,
            BucketName::BooksByKeywordOrRegexOrdered => {
                &self.data.books_by_keyword_or_regex_ordered
            }
        }
    }

    /// True when no bucket could be filled because every search class failed.
    pub fn is_fully_unavailable(&self) -> bool {
        BucketName::all()
            .iter()
            .all(|name| !self.bucket(*name).is_available())
    }
}
