use log::{info, trace, warn};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    model::{Book, Rating, SearchPage},
    normalize::normalize_volume,
    TransportError, TransportErrorKind,
};

use super::{endpoint, Client};

pub(crate) const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1";
pub(crate) const SOURCE: &str = "Google Books";
const MAX_RATING: f64 = 5.0;

/// The envelope of a volumes search. The items themselves are left untyped and handed to the
/// normalizer.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct GoogleModel {
    #[serde(rename = "totalItems", default)]
    total_items: u64,
    #[serde(default)]
    items: Option<Vec<Value>>,
}

pub(crate) fn search_url(
    base: &str,
    query: &str,
    max_results: u32,
    start_index: u32,
) -> Result<Url, TransportError> {
    let mut url = endpoint(base, &["volumes"])?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("maxResults", &max_results.to_string());
    if start_index > 0 {
        url.query_pairs_mut()
            .append_pair("startIndex", &start_index.to_string());
    }
    Ok(url)
}

pub(crate) fn volume_url(base: &str, id: &str) -> Result<Url, TransportError> {
    endpoint(base, &["volumes", id])
}

pub(crate) fn isbn_url(base: &str, isbn: &str) -> Result<Url, TransportError> {
    let mut url = endpoint(base, &["volumes"])?;
    url.query_pairs_mut().append_pair("q", &format!("isbn:{isbn}"));
    Ok(url)
}

pub(crate) fn search_volumes<C: Client>(
    client: &C,
    base: &str,
    query: &str,
    max_results: u32,
    start_index: u32,
) -> Result<SearchPage, TransportError> {
    info!("Searching for '{query}' using Google Books API");
    let url = search_url(base, query, max_results, start_index)?;
    trace!("GET {url}");

    let GoogleModel { total_items, items } = client.get_json(url.as_str())?;
    let items = items.unwrap_or_default();
    trace!("Request was successful - {} item(s) returned", items.len());

    let books = items
        .iter()
        .filter_map(|item| {
            let volume = item.as_object();
            if volume.is_none() {
                warn!("Skipping search result that is not an object");
            }
            volume
        })
        .map(normalize_volume)
        .filter(|book| {
            if book.id.is_empty() {
                warn!("Skipping search result '{}' without an id", book.title);
            }
            !book.id.is_empty()
        })
        .collect();

    Ok(SearchPage { books, total_items })
}

pub(crate) fn get_volume<C: Client>(
    client: &C,
    base: &str,
    id: &str,
) -> Result<Book, TransportError> {
    info!("Fetching volume '{id}' using Google Books API");
    let url = volume_url(base, id)?;
    trace!("GET {url}");

    let raw: Value = client.get_json(url.as_str())?;
    let volume = raw.as_object().ok_or_else(|| {
        TransportError::new(
            TransportErrorKind::Deserialize,
            "Expected the volume response to be a JSON object",
        )
    })?;

    let mut book = normalize_volume(volume);
    if book.id.is_empty() {
        id.clone_into(&mut book.id);
    }
    Ok(book)
}

/// Reads the rating of the first volume matching `isbn`.
///
/// `Ok(None)` when no volume matches or the volume carries no rating.
pub(crate) fn get_rating<C: Client>(
    client: &C,
    base: &str,
    isbn: &str,
) -> Result<Option<Rating>, TransportError> {
    info!("Searching rating for ISBN '{isbn}' using Google Books API");
    let url = isbn_url(base, isbn)?;
    trace!("GET {url}");

    let GoogleModel { items, .. } = client.get_json(url.as_str())?;

    let rating = items
        .unwrap_or_default()
        .first()
        .and_then(|item| item.get("volumeInfo"))
        .and_then(|info| {
            let value = info.get("averageRating").and_then(Value::as_f64)?;
            Some(Rating {
                source: SOURCE.to_owned(),
                value,
                max_value: MAX_RATING,
                review_count: info.get("ratingsCount").and_then(Value::as_u64),
            })
        });

    Ok(rating)
}
