//! Plain-text views of search results and book details for the terminal.
//!
//! Each view is a borrowed wrapper implementing [`fmt::Display`]. A bucket
//! renders a result count, "no results found", "partially unavailable" when
//! one merged source failed, or "temporarily unavailable" when every source
//! failed.

use std::fmt;

use bookshelf_search::{BookRecord, Bucket, ImageSize, Person, SearchResultSet};

/// Which content bucket to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentOrder {
    /// Plain keyword relevance (`booksByKeywordOrRegex`).
    #[default]
    Relevance,
    /// Backend closeness-centrality ranking (`booksByKeywordOrRegexOrdered`).
    Closeness,
}

impl ContentOrder {
    fn label(self) -> &'static str {
        match self {
            Self::Relevance => "relevance of keyword",
            Self::Closeness => "popularity (closeness centrality)",
        }
    }
}

/// Search results grouped by title, content, and author.
pub struct ResultSetView<'a> {
    set: &'a SearchResultSet,
    order: ContentOrder,
}

impl<'a> ResultSetView<'a> {
    pub fn new(set: &'a SearchResultSet, order: ContentOrder) -> Self {
        Self { set, order }
    }
}

impl fmt::Display for ResultSetView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = &self.set.keyword;
        let data = &self.set.data;

        write_bucket(f, "titles", keyword, &data.books_by_title)?;
        writeln!(f)?;

        let content = match self.order {
            ContentOrder::Relevance => &data.books_by_keyword_or_regex,
            ContentOrder::Closeness => &data.books_by_keyword_or_regex_ordered,
        };
        write_header(f, "content", keyword, content)?;
        if !content.is_empty() {
            writeln!(f, "Ordered by {}", self.order.label())?;
            write!(f, "{}", BookListView(content.books()))?;
        }
        writeln!(f)?;

        write_bucket(f, "authors' names", keyword, &data.books_by_author)
    }
}

fn write_header(
    f: &mut fmt::Formatter<'_>,
    what: &str,
    keyword: &str,
    bucket: &Bucket,
) -> fmt::Result {
    match bucket {
        Bucket::Unavailable { reason } => {
            writeln!(f, "Search of books' {what} is temporarily unavailable ({reason})")
        }
        Bucket::Available { books } if books.is_empty() => {
            writeln!(f, "No results found of books' {what} containing \"{keyword}\"")
        }
        Bucket::Available { books } => {
            writeln!(f, "{} results of books' {what} containing \"{keyword}\"", books.len())
        }
        Bucket::Partial { books, reason } if books.is_empty() => {
            writeln!(f, "Search of books' {what} is partially unavailable ({reason})")
        }
        Bucket::Partial { books, reason } => {
            writeln!(
                f,
                "{} results of books' {what} containing \"{keyword}\" (partial: {reason})",
                books.len()
            )
        }
    }
}

fn write_bucket(
    f: &mut fmt::Formatter<'_>,
    what: &str,
    keyword: &str,
    bucket: &Bucket,
) -> fmt::Result {
    write_header(f, what, keyword, bucket)?;
    write!(f, "{}", BookListView(bucket.books()))
}

/// Result list entries: id, title, small image, and credits.
pub struct BookListView<'a>(pub &'a [BookRecord]);

impl fmt::Display for BookListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for book in self.0 {
            writeln!(f, "  [{}] {}", book.id, book.title)?;
            if !book.image.is_empty() {
                writeln!(f, "      image: {}", book.image_variant(ImageSize::Small))?;
            }
            write_people(f, "      Author", &book.authors)?;
            write_people(f, "      Translators", &book.translators)?;
            write_list(f, "      Bookshelves", &book.bookshelves)?;
            write_list(f, "      Subject", &book.subjects)?;
        }
        Ok(())
    }
}

/// Detail view of a single book.
pub struct BookDetailView<'a>(pub &'a BookRecord);

impl fmt::Display for BookDetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let book = self.0;
        writeln!(f, "Information about book \"{}\" [{}]", book.title, book.id)?;
        if !book.image.is_empty() {
            writeln!(f, "Cover: {}", book.image_variant(ImageSize::Medium))?;
        }
        write_people(f, "Author", &book.authors)?;
        write_people(f, "Translators", &book.translators)?;
        write_list(f, "Bookshelves", &book.bookshelves)?;
        write_list(f, "Subject", &book.subjects)?;
        write_list(f, "Language", &book.languages)?;
        if !book.text.is_empty() {
            writeln!(f, "Read this book online: {}", book.text)?;
        }
        Ok(())
    }
}

fn write_people(f: &mut fmt::Formatter<'_>, label: &str, people: &[Person]) -> fmt::Result {
    if people.is_empty() {
        return Ok(());
    }
    let names: Vec<String> = people.iter().map(Person::display_name).collect();
    writeln!(f, "{label}: {}", names.join(", "))
}

fn write_list(f: &mut fmt::Formatter<'_>, label: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "{label}: {}", items.join("; "))
}
