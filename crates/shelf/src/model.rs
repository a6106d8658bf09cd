//! The canonical records every provider response is mapped into.
//!
//! Records are plain values: they are created fresh for every call and are never cached or
//! mutated by the library.
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Title used when the provider does not supply one.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Author used when the provider does not list any authors.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// A single book as returned by [`Catalog::search`][crate::Catalog::search] and
/// [`Catalog::lookup`][crate::Catalog::lookup].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Provider-assigned id, stable across calls for the same volume.
    pub id: String,
    /// Title, or [`UNKNOWN_TITLE`].
    pub title: String,
    /// Only the first listed author, or [`UNKNOWN_AUTHOR`].
    pub author: String,
    /// Year part of the published date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<String>,
    /// Cover thumbnail, always https when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Description text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISBN-13 when available, otherwise ISBN-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// Publisher name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Average rating on a 0-5 scale as supplied by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of ratings behind [`Book::rating`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u64>,
}

impl Book {
    /// A Google web search for the title and author.
    #[must_use]
    pub fn web_search_url(&self) -> Option<String> {
        let q = format!("{} {}", self.title, self.author);
        Url::parse_with_params("https://www.google.com/search", [("q", q.as_str())])
            .ok()
            .map(String::from)
    }

    /// An Open Library search for the title.
    #[must_use]
    pub fn open_library_search_url(&self) -> Option<String> {
        Url::parse_with_params(
            "https://openlibrary.org/search",
            [("q", self.title.as_str())],
        )
        .ok()
        .map(String::from)
    }
}

/// A rating for a book from a single provider.
///
/// Independent of [`Book::rating`]: a [`Rating`] is looked up by ISBN and may come from any of
/// the configured rating sources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Name of the provider the rating came from.
    pub source: String,
    /// The rating on a scale from 0 to `max_value`.
    pub value: f64,
    /// Upper bound of the rating scale.
    pub max_value: f64,
    /// Number of ratings the value is based on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
}

/// A published review of a book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Name of the publication.
    pub source: String,
    /// Link to the review.
    pub url: String,
    /// Reviewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byline: Option<String>,
    /// Short summary of the review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Publication date of the review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

/// One page of search results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// The books on this page.
    pub books: Vec<Book>,
    /// Total number of matches the provider reports for the query.
    pub total_items: u64,
}

#[test]
fn book_serializes_with_camel_case_and_skips_absent_fields() {
    let book = Book {
        id: "1".to_owned(),
        title: "Test Book".to_owned(),
        author: "Test Author".to_owned(),
        published_year: Some("2023".to_owned()),
        rating: Some(4.5),
        ratings_count: Some(100),
        ..Book::default()
    };

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(
        serde_json::json!({
            "id": "1",
            "title": "Test Book",
            "author": "Test Author",
            "publishedYear": "2023",
            "rating": 4.5,
            "ratingsCount": 100,
        }),
        json
    );
}

#[test]
fn search_links_encode_title_and_author() {
    let book = Book {
        title: "Dune & Messiah".to_owned(),
        author: "Frank Herbert".to_owned(),
        ..Book::default()
    };

    assert_eq!(
        Some("https://www.google.com/search?q=Dune+%26+Messiah+Frank+Herbert".to_owned()),
        book.web_search_url()
    );
    assert_eq!(
        Some("https://openlibrary.org/search?q=Dune+%26+Messiah".to_owned()),
        book.open_library_search_url()
    );
}
