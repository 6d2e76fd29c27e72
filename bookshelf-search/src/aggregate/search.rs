//! Result aggregator: concurrent per-class fan-out, merge, dedup, bucket.
//!
//! One query is sent to every search class at once. Keyword and regex
//! results are merged per ranking variant; each bucket is deduplicated by
//! book id. Books may appear in more than one bucket.

use crate::backend::CatalogBackend;
use crate::error::SearchError;
use crate::types::{BookRecord, Bucket, BucketName, SearchBuckets, SearchClass, SearchResultSet};

use super::dedup::{merge_unique, unique_books};

/// Outcome of one backend call, tagged with its search class.
type ClassOutcome = (SearchClass, Result<Vec<BookRecord>, SearchError>);

/// Build the result set for `query`.
///
/// # Pipeline
///
/// 1. Treat a missing query as the empty string
/// 2. Fan out ranked keyword, ranked regex, keyword, regex, author and title
///    searches concurrently with [`futures::join!`]
/// 3. Ranked keyword ++ ranked regex, deduplicated → `booksByKeywordOrRegexOrdered`
/// 4. Keyword ++ regex, deduplicated → `booksByKeywordOrRegex`
/// 5. Title and author results deduplicated independently
///
/// Never fails. A bucket whose every source failed is
/// [`Bucket::Unavailable`]; a merged bucket with one failed source is
/// [`Bucket::Partial`], keeping the other source's books and the failure.
pub async fn aggregate<B: CatalogBackend>(backend: &B, query: Option<&str>) -> SearchResultSet {
    let keyword = query.unwrap_or_default().to_owned();
    let q = keyword.as_str();

    let (keyword_ranked, regex_ranked, keyword_plain, regex_plain, by_author, by_title) =
        futures::join!(
            backend.by_keyword(q, true),
            backend.by_regex(q, true),
            backend.by_keyword(q, false),
            backend.by_regex(q, false),
            backend.by_author(q),
            backend.by_title(q),
        );

    let data = SearchBuckets {
        books_by_title: single_bucket(BucketName::BooksByTitle, (SearchClass::Title, by_title)),
        books_by_author: single_bucket(
            BucketName::BooksByAuthor,
            (SearchClass::Author, by_author),
        ),
        books_by_keyword_or_regex: merged_bucket(
            BucketName::BooksByKeywordOrRegex,
            (SearchClass::Keyword { ranked: false }, keyword_plain),
            (SearchClass::Regex { ranked: false }, regex_plain),
        ),
        books_by_keyword_or_regex_ordered: merged_bucket(
            BucketName::BooksByKeywordOrRegexOrdered,
            (SearchClass::Keyword { ranked: true }, keyword_ranked),
            (SearchClass::Regex { ranked: true }, regex_ranked),
        ),
    };

    SearchResultSet { keyword, data }
}

fn single_bucket(name: BucketName, (class, outcome): ClassOutcome) -> Bucket {
    match outcome {
        Ok(books) => {
            let books = unique_books(books);
            tracing::debug!(bucket = %name, count = books.len(), "bucket filled");
            Bucket::Available { books }
        }
        Err(err) => {
            tracing::warn!(bucket = %name, %class, error = %err, "search class failed");
            Bucket::Unavailable {
                reason: err.to_string(),
            }
        }
    }
}

fn merged_bucket(name: BucketName, first: ClassOutcome, second: ClassOutcome) -> Bucket {
    let (first_class, first) = first;
    let (second_class, second) = second;

    let (books, failed_class, err) = match (first, second) {
        (Ok(a), Ok(b)) => {
            let books = merge_unique(a, b);
            tracing::debug!(bucket = %name, count = books.len(), "bucket filled");
            return Bucket::Available { books };
        }
        (Ok(books), Err(err)) => (books, second_class, err),
        (Err(err), Ok(books)) => (books, first_class, err),
        (Err(a), Err(b)) => {
            tracing::warn!(bucket = %name, error_a = %a, error_b = %b, "all sources failed");
            return Bucket::Unavailable {
                reason: format!("{first_class}: {a}; {second_class}: {b}"),
            };
        }
    };

    tracing::warn!(bucket = %name, class = %failed_class, error = %err, "search class failed");
    let books = unique_books(books);
    tracing::debug!(bucket = %name, count = books.len(), "bucket partially filled");
    Bucket::Partial {
        books,
        reason: format!("{failed_class}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::dedup::ids;
    use crate::backend::CatalogQuery;
    use crate::types::BookId;
    use std::collections::HashMap;

    /// In-memory backend answering per search class.
    #[derive(Default)]
    struct ScriptedBackend {
        answers: HashMap<SearchClass, Vec<i64>>,
        failing: Vec<SearchClass>,
    }

    impl ScriptedBackend {
        fn answer(mut self, class: SearchClass, ids_in: &[i64]) -> Self {
            self.answers.insert(class, ids_in.to_vec());
            self
        }

        fn fail(mut self, class: SearchClass) -> Self {
            self.failing.push(class);
            self
        }
    }

    impl CatalogBackend for ScriptedBackend {
        async fn fetch(&self, query: CatalogQuery<'_>) -> Result<Vec<BookRecord>, SearchError> {
            let class = query.class();
            if self.failing.contains(&class) {
                return Err(SearchError::Transport(format!("{class} backend down")));
            }
            Ok(self
                .answers
                .get(&class)
                .map(|ids_in| ids_in.iter().map(|&id| make_book(id)).collect())
                .unwrap_or_default())
        }

        async fn by_id(&self, id: &BookId) -> Result<BookRecord, SearchError> {
            Err(SearchError::NotFound(id.to_string()))
        }
    }

    fn make_book(id: i64) -> BookRecord {
        serde_json::from_value(serde_json::json!({ "id": id, "title": format!("Book {id}") }))
            .expect("valid book")
    }

    fn id_list(ids_in: &[i64]) -> Vec<BookId> {
        ids_in.iter().map(|&id| BookId::from(id)).collect()
    }

    #[tokio::test]
    async fn all_empty_yields_four_empty_buckets() {
        let backend = ScriptedBackend::default();
        let set = aggregate(&backend, Some("zzzlkjlkj")).await;

        assert_eq!(set.keyword, "zzzlkjlkj");
        for name in BucketName::all() {
            let bucket = set.bucket(*name);
            assert!(bucket.is_available(), "{name} should be available");
            assert!(bucket.is_empty(), "{name} should be empty");
        }
    }

    #[tokio::test]
    async fn ranked_sources_merge_without_duplicates() {
        let backend = ScriptedBackend::default()
            .answer(SearchClass::Keyword { ranked: true }, &[1, 2])
            .answer(SearchClass::Regex { ranked: true }, &[2, 3]);
        let set = aggregate(&backend, Some("whale")).await;

        assert_eq!(
            ids(set.data.books_by_keyword_or_regex_ordered.books()),
            id_list(&[1, 2, 3])
        );
    }

    #[tokio::test]
    async fn unranked_sources_merge_without_duplicates() {
        let backend = ScriptedBackend::default()
            .answer(SearchClass::Keyword { ranked: false }, &[4, 8, 4])
            .answer(SearchClass::Regex { ranked: false }, &[8, 15, 4]);
        let set = aggregate(&backend, Some("lost")).await;

        assert_eq!(
            ids(set.data.books_by_keyword_or_regex.books()),
            id_list(&[4, 8, 15])
        );
    }

    #[tokio::test]
    async fn title_duplicates_from_backend_collapse() {
        let backend = ScriptedBackend::default().answer(SearchClass::Title, &[5, 5]);
        let set = aggregate(&backend, Some("emma")).await;
        assert_eq!(ids(set.data.books_by_title.books()), id_list(&[5]));
    }

    #[tokio::test]
    async fn no_cross_bucket_dedup() {
        let backend = ScriptedBackend::default()
            .answer(SearchClass::Title, &[7])
            .answer(SearchClass::Author, &[7])
            .answer(SearchClass::Keyword { ranked: false }, &[7]);
        let set = aggregate(&backend, Some("seven")).await;

        assert_eq!(ids(set.data.books_by_title.books()), id_list(&[7]));
        assert_eq!(ids(set.data.books_by_author.books()), id_list(&[7]));
        assert_eq!(ids(set.data.books_by_keyword_or_regex.books()), id_list(&[7]));
    }

    #[tokio::test]
    async fn missing_query_becomes_empty_keyword() {
        let backend = ScriptedBackend::default().answer(SearchClass::Title, &[1]);
        let set = aggregate(&backend, None).await;
        assert_eq!(set.keyword, "");
        assert_eq!(set.data.books_by_title.len(), 1);
    }

    #[tokio::test]
    async fn failed_single_source_bucket_is_unavailable() {
        let backend = ScriptedBackend::default()
            .answer(SearchClass::Title, &[1])
            .fail(SearchClass::Author);
        let set = aggregate(&backend, Some("x")).await;

        assert!(set.data.books_by_title.is_available());
        match &set.data.books_by_author {
            Bucket::Unavailable { reason } => assert!(reason.contains("author backend down")),
            Bucket::Available { .. } | Bucket::Partial { .. } => {
                panic!("author bucket should be unavailable")
            }
        }
        assert!(!set.is_fully_unavailable());
    }

    #[tokio::test]
    async fn merged_bucket_survives_one_failed_source() {
        let backend = ScriptedBackend::default()
            .answer(SearchClass::Keyword { ranked: true }, &[3, 1])
            .fail(SearchClass::Regex { ranked: true });
        let set = aggregate(&backend, Some("x")).await;

        let bucket = &set.data.books_by_keyword_or_regex_ordered;
        assert!(bucket.is_available());
        assert!(bucket.is_degraded());
        assert_eq!(ids(bucket.books()), id_list(&[3, 1]));
    }

    #[tokio::test]
    async fn empty_source_plus_failed_source_is_not_no_matches() {
        let backend = ScriptedBackend::default().fail(SearchClass::Regex { ranked: true });
        let set = aggregate(&backend, Some("x")).await;

        match &set.data.books_by_keyword_or_regex_ordered {
            Bucket::Partial { books, reason } => {
                assert!(books.is_empty());
                assert!(reason.starts_with("ranked regex: "));
            }
            other => panic!("expected partial bucket, got {other:?}"),
        }
        assert!(matches!(
            set.data.books_by_keyword_or_regex,
            Bucket::Available { .. }
        ));
    }

    #[tokio::test]
    async fn merged_bucket_unavailable_when_both_sources_fail() {
        let backend = ScriptedBackend::default()
            .fail(SearchClass::Keyword { ranked: false })
            .fail(SearchClass::Regex { ranked: false });
        let set = aggregate(&backend, Some("x")).await;

        match &set.data.books_by_keyword_or_regex {
            Bucket::Unavailable { reason } => {
                assert!(reason.contains("keyword"));
                assert!(reason.contains("regex"));
            }
            Bucket::Available { .. } | Bucket::Partial { .. } => {
                panic!("bucket should be unavailable")
            }
        }
        // Other buckets are unaffected.
        assert!(set.data.books_by_keyword_or_regex_ordered.is_available());
    }

    #[tokio::test]
    async fn every_class_failing_still_completes() {
        let backend = ScriptedBackend::default()
            .fail(SearchClass::Title)
            .fail(SearchClass::Author)
            .fail(SearchClass::Keyword { ranked: true })
            .fail(SearchClass::Keyword { ranked: false })
            .fail(SearchClass::Regex { ranked: true })
            .fail(SearchClass::Regex { ranked: false });
        let set = aggregate(&backend, Some("anything")).await;

        assert_eq!(set.keyword, "anything");
        assert!(set.is_fully_unavailable());
    }
}
