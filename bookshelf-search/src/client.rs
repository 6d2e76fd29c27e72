//! HTTP implementation of [`CatalogBackend`] against the catalog REST API.
//!
//! Every operation issues exactly one `GET` request. Parameters are
//! URL-encoded by `reqwest`; bodies are read as text and parsed with
//! `serde_json` so that transport and decoding failures stay distinct.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::backend::{CatalogBackend, CatalogQuery};
use crate::config::ClientConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::{BookId, BookRecord, SearchClass};

/// Catalog API client.
///
/// Holds one [`reqwest::Client`] shared by all calls made through it.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    books_endpoint: Url,
}

impl CatalogClient {
    /// Build a client for the catalog described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the config is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let books_endpoint = Url::parse(&config.books_endpoint())
            .map_err(|e| SearchError::Config(format!("invalid books endpoint: {e}")))?;
        Ok(Self {
            http: http::build_client(config)?,
            books_endpoint,
        })
    }

    /// URL of one book: the id is appended as a single percent-encoded path
    /// segment, so `/`, `?` and `#` cannot change the resource.
    fn book_url(&self, id: &BookId) -> Result<Url, SearchError> {
        if id.as_str().is_empty() {
            return Err(SearchError::NotFound("empty book id".into()));
        }
        let mut url = self.books_endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| SearchError::Config(format!("{} cannot take a path", self.books_endpoint)))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }

    async fn search_books(&self, query: CatalogQuery<'_>) -> Result<Vec<BookRecord>, SearchError> {
        let class = query.class();
        let params = query.params();
        tracing::trace!(%class, ?params, "catalog search");

        let request = self.http.get(self.books_endpoint.clone()).query(&params);
        let (status, body) = self.get_body(request, class).await?;
        if !status.is_success() {
            return Err(map_http_error(status, class));
        }

        let books: Vec<BookRecord> = parse_body(&body, class)?;
        tracing::debug!(%class, count = books.len(), "catalog returned books");
        Ok(books)
    }

    async fn lookup_book(&self, id: &BookId) -> Result<BookRecord, SearchError> {
        let class = SearchClass::Id;
        let url = self.book_url(id)?;
        tracing::trace!(%id, %url, "catalog lookup");

        let (status, body) = self.get_body(self.http.get(url), class).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(SearchError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(map_http_error(status, class));
        }

        parse_body(&body, class)
    }

    /// Send a GET and return the raw body of a successful response.
    async fn get_body(
        &self,
        request: reqwest::RequestBuilder,
        class: SearchClass,
    ) -> Result<(StatusCode, String), SearchError> {
        let response = request
            .send()
            .await
            .map_err(|e| SearchError::Transport(format!("{class} request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(format!("{class} response read failed: {e}")))?;

        tracing::trace!(%class, %status, bytes = body.len(), "catalog response received");
        Ok((status, body))
    }
}

impl CatalogBackend for CatalogClient {
    async fn fetch(&self, query: CatalogQuery<'_>) -> Result<Vec<BookRecord>, SearchError> {
        let class = query.class();
        self.search_books(query)
            .await
            .inspect_err(|e| tracing::warn!(%class, error = %e, "catalog search failed"))
    }

    async fn by_id(&self, id: &BookId) -> Result<BookRecord, SearchError> {
        let class = SearchClass::Id;
        self.lookup_book(id)
            .await
            .inspect_err(|e| tracing::warn!(%class, %id, error = %e, "catalog lookup failed"))
    }
}

fn map_http_error(status: StatusCode, class: SearchClass) -> SearchError {
    SearchError::Transport(format!("{class} request returned HTTP {status}"))
}

/// Decode a JSON body into `T`.
///
/// Extracted as a separate function for testability with canned bodies.
pub(crate) fn parse_body<T: DeserializeOwned>(
    body: &str,
    class: SearchClass,
) -> Result<T, SearchError> {
    serde_json::from_str(body)
        .map_err(|e| SearchError::MalformedResponse(format!("{class} response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BOOKS: &str = r#"[
        {
            "id": 1342,
            "title": "Pride and Prejudice",
            "image": "https://covers.example/1342.cover.medium.jpg",
            "authors": [{"name": "Austen, Jane"}],
            "translators": [],
            "bookshelves": ["Best Books Ever Listings"],
            "subjects": ["Courtship -- Fiction"],
            "languages": ["en"],
            "text": "https://books.example/1342.txt"
        },
        {"id": 158, "title": "Emma", "authors": [{"name": "Austen, Jane"}]}
    ]"#;

    #[test]
    fn parse_book_list() {
        let books: Vec<BookRecord> =
            parse_body(TWO_BOOKS, SearchClass::Title).expect("valid list");
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, BookId::from(1342));
        assert_eq!(books[0].authors[0].name, "Austen, Jane");
        assert_eq!(books[1].title, "Emma");
        assert!(books[1].subjects.is_empty());
    }

    #[test]
    fn parse_empty_list_is_ok() {
        let books: Vec<BookRecord> = parse_body("[]", SearchClass::Author).expect("empty list");
        assert!(books.is_empty());
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_body::<Vec<BookRecord>>("<html>oops</html>", SearchClass::Title)
            .unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
        assert!(err.to_string().contains("title response"));
    }

    #[test]
    fn schema_mismatch_is_malformed() {
        let err = parse_body::<Vec<BookRecord>>(r#"{"id": 1}"#, SearchClass::Keyword {
            ranked: false,
        })
        .unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }

    #[test]
    fn http_error_maps_to_transport() {
        let err = map_http_error(StatusCode::INTERNAL_SERVER_ERROR, SearchClass::Regex {
            ranked: true,
        });
        assert!(matches!(err, SearchError::Transport(_)));
        assert!(err.to_string().contains("ranked regex"));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = ClientConfig::default().with_timeout(0);
        assert!(CatalogClient::new(&config).is_err());
    }

    #[test]
    fn new_accepts_default_config() {
        assert!(CatalogClient::new(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn book_url_encodes_id_as_one_segment() {
        let config = ClientConfig::default().with_base_url("http://host:8080/api/");
        let client = CatalogClient::new(&config).expect("client");

        let url = client.book_url(&BookId::from(84)).expect("url");
        assert_eq!(url.as_str(), "http://host:8080/api/books/84");

        let url = client.book_url(&BookId::from("12?x=1#frag")).expect("url");
        assert_eq!(url.as_str(), "http://host:8080/api/books/12%3Fx=1%23frag");
        assert_eq!(url.query(), None);

        let url = client.book_url(&BookId::from("a/b")).expect("url");
        assert_eq!(url.path(), "/api/books/a%2Fb");
    }

    #[test]
    fn book_url_rejects_blank_id() {
        let client = CatalogClient::new(&ClientConfig::default()).expect("client");
        let err = client.book_url(&BookId::from("   ")).unwrap_err();
        assert!(matches!(err, SearchError::NotFound(_)));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogClient>();
    }
}
