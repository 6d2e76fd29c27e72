//! Bookshelf: search a remote book catalog and browse book details.
//!
//! The search aggregation itself lives in the `bookshelf-search` crate.
//! This crate wires it to configuration, logging, and terminal output.

pub mod commands;
pub mod config;
pub mod error;
pub mod present;

pub use commands::OutputFormat;
pub use config::BookshelfConfig;
pub use error::{BookshelfError, Result};
pub use present::ContentOrder;
