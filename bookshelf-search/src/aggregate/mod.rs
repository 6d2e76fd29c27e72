//! Search aggregation: concurrent per-class queries, merge, dedup, buckets.
//!
//! This module fans a single query out to every catalog search class
//! concurrently, merges keyword and regex results per ranking variant,
//! deduplicates each bucket by book id, and returns a [`crate::SearchResultSet`].

pub mod dedup;
pub mod search;
