//! Stable deduplication of result lists.
//!
//! The first occurrence of each key wins and retained items keep their
//! relative order. Book equality is decided in one place,
//! [`unique_books`], by `id`.

use std::collections::HashSet;
use std::hash::Hash;

use crate::types::BookRecord;

/// Remove items whose key was already seen, keeping the first occurrence.
///
/// `key` is called once per item. The result preserves the input order of
/// the retained items.
pub fn unique_by<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen: HashSet<K> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Deduplicate books by `id`.
///
/// Two records with the same id are the same book even if other fields
/// differ; the earlier record is kept.
pub fn unique_books(books: Vec<BookRecord>) -> Vec<BookRecord> {
    unique_by(books, |book| book.id.clone())
}

/// Concatenate two result lists and deduplicate the combined list by `id`.
pub fn merge_unique(first: Vec<BookRecord>, second: Vec<BookRecord>) -> Vec<BookRecord> {
    let mut combined = first;
    combined.extend(second);
    unique_books(combined)
}

/// Ids in list order, for comparing result lists in tests.
#[cfg(test)]
pub(crate) fn ids(books: &[BookRecord]) -> Vec<crate::types::BookId> {
    books.iter().map(|book| book.id.clone()).collect()
}
