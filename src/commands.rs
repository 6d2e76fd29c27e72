//! Command implementations shared by the CLI binary and tests.
//!
//! Each command runs one catalog operation and renders the outcome as text
//! or JSON.

use std::path::Path;

use bookshelf_search::{BookId, SearchResultSet};

use crate::config::BookshelfConfig;
use crate::error::{BookshelfError, Result};
use crate::present::{BookDetailView, BookListView, ContentOrder, ResultSetView};

/// Output rendering for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Run an aggregated search and render it.
///
/// # Errors
///
/// Returns an error only for invalid configuration; failed search classes
/// are rendered as unavailable.
pub async fn search(
    config: &BookshelfConfig,
    query: Option<&str>,
    order: ContentOrder,
    format: OutputFormat,
) -> Result<String> {
    let set = bookshelf_search::search(query, &config.api.client_config()).await?;
    if set.is_fully_unavailable() {
        tracing::warn!(base_url = %config.api.base_url, "every search class failed; is the catalog reachable?");
    }
    render_result_set(&set, order, format)
}

/// Fetch one book and render its detail view.
///
/// # Errors
///
/// Returns [`bookshelf_search::SearchError::NotFound`] (wrapped) for an
/// unknown id, or any transport, decoding or config error.
pub async fn book(config: &BookshelfConfig, id: &BookId, format: OutputFormat) -> Result<String> {
    let book = bookshelf_search::book(id, &config.api.client_config()).await?;
    match format {
        OutputFormat::Text => Ok(BookDetailView(&book).to_string()),
        OutputFormat::Json => to_json(&book),
    }
}

/// Fetch books similar to `ids` and render them as a list.
///
/// # Errors
///
/// Returns any transport, decoding or config error.
pub async fn suggest(config: &BookshelfConfig, ids: &[String], format: OutputFormat) -> Result<String> {
    let books = bookshelf_search::suggestions(ids, &config.api.client_config()).await?;
    match format {
        OutputFormat::Text if books.is_empty() => Ok("No suggestions found\n".to_owned()),
        OutputFormat::Text => Ok(format!(
            "{} suggested books\n{}",
            books.len(),
            BookListView(&books)
        )),
        OutputFormat::Json => to_json(&books),
    }
}

/// Write a default configuration file to `path`, or to the default config
/// path when `path` is `None`.
///
/// # Errors
///
/// Returns [`BookshelfError::Config`] if the file exists and `force` is not
/// set, or if no config directory can be determined; otherwise any I/O error.
pub fn init_config(path: Option<&Path>, force: bool) -> Result<String> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => BookshelfConfig::default_config_path().ok_or_else(|| {
            BookshelfError::Config("no config directory found; pass --config <path>".into())
        })?,
    };
    if target.exists() && !force {
        return Err(BookshelfError::Config(format!(
            "{} already exists; use --force to overwrite",
            target.display()
        )));
    }
    BookshelfConfig::default().save_to_file(&target)?;
    tracing::info!(path = %target.display(), "wrote default config");
    Ok(format!("Wrote default configuration to {}\n", target.display()))
}

fn render_result_set(set: &SearchResultSet, order: ContentOrder, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(ResultSetView::new(set, order).to_string()),
        OutputFormat::Json => to_json(set),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
