use log::{error, trace, warn};

use crate::{
    api::{google_books, nytimes, open_library, Client},
    model::{Book, Rating, Review, SearchPage},
    Error, TransportError,
};

/// Number of results requested per search.
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Settings for a [`Catalog`].
///
/// The defaults point at the public provider endpoints, request [`DEFAULT_MAX_RESULTS`] results
/// per search and only use Google Books for ratings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    catalog_url: String,
    max_results: u32,
    open_library_url: String,
    open_library: bool,
    nytimes_url: String,
    nytimes_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: google_books::GOOGLE_BOOKS_URL.to_owned(),
            max_results: DEFAULT_MAX_RESULTS,
            open_library_url: open_library::OPEN_LIBRARY_URL.to_owned(),
            open_library: false,
            nytimes_url: nytimes::NYTIMES_URL.to_owned(),
            nytimes_api_key: None,
        }
    }
}

impl Config {
    /// Base url of the Google Books compatible catalog, e.g. `https://www.googleapis.com/books/v1`.
    #[must_use]
    pub fn with_catalog_url<S: Into<String>>(mut self, url: S) -> Self {
        self.catalog_url = url.into();
        self
    }

    /// Maximum number of results requested per search.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Base url of the Open Library API.
    #[must_use]
    pub fn with_open_library_url<S: Into<String>>(mut self, url: S) -> Self {
        self.open_library_url = url.into();
        self
    }

    /// Consult Open Library when Google Books has no rating for a book.
    #[must_use]
    pub const fn with_open_library(mut self, enabled: bool) -> Self {
        self.open_library = enabled;
        self
    }

    /// Base url of the New York Times books API.
    #[must_use]
    pub fn with_nytimes_url<S: Into<String>>(mut self, url: S) -> Self {
        self.nytimes_url = url.into();
        self
    }

    /// API key for the New York Times books API. Reviews are only available when a non-empty key
    /// is configured.
    #[must_use]
    pub fn with_nytimes_api_key<S: Into<String>>(mut self, key: Option<S>) -> Self {
        self.nytimes_api_key = key
            .map(Into::into)
            .map(|k: String| k.trim().to_owned())
            .filter(|k| !k.is_empty());
        self
    }

    /// Maximum number of results requested per search.
    #[must_use]
    pub const fn max_results(&self) -> u32 {
        self.max_results
    }
}

/// A provider that may know a rating for an ISBN.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RatingSource {
    /// The identifier search of the Google Books catalog.
    GoogleBooks,
    /// Open Library work ratings.
    OpenLibrary,
}

impl RatingSource {
    /// The label used as [`Rating::source`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GoogleBooks => google_books::SOURCE,
            Self::OpenLibrary => open_library::SOURCE,
        }
    }
}

/// The New York Times reviews capability. Only exists when an api key is configured.
#[derive(Clone, Debug, PartialEq, Eq)]
struct NyTimes {
    url: String,
    api_key: String,
}

/// Searches the book catalog and gathers ratings and reviews for its books.
///
/// Every operation is independent: nothing is cached between calls and the records returned are
/// built fresh from each provider response.
#[derive(Debug)]
pub struct Catalog<C: Client> {
    client: C,
    catalog_url: String,
    max_results: u32,
    open_library_url: String,
    rating_sources: Vec<RatingSource>,
    nytimes: Option<NyTimes>,
}

impl Catalog<reqwest::blocking::Client> {
    /// Creates a [`Catalog`] using a default blocking reqwest client.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_client(reqwest::blocking::Client::new(), config)
    }
}

impl<C: Client> Catalog<C> {
    /// Creates a [`Catalog`] that sends its requests through `client`.
    pub fn with_client(client: C, config: Config) -> Self {
        let Config {
            catalog_url,
            max_results,
            open_library_url,
            open_library,
            nytimes_url,
            nytimes_api_key,
        } = config;

        let mut rating_sources = vec![RatingSource::GoogleBooks];
        if open_library {
            rating_sources.push(RatingSource::OpenLibrary);
        }

        let nytimes = nytimes_api_key.map(|api_key| NyTimes {
            url: nytimes_url,
            api_key,
        });
        if nytimes.is_none() {
            trace!("No New York Times api key configured - reviews are unavailable");
        }

        Self {
            client,
            catalog_url,
            max_results,
            open_library_url,
            rating_sources,
            nytimes,
        }
    }

    /// The rating sources consulted by [`Catalog::ratings`], in order.
    #[must_use]
    pub fn rating_sources(&self) -> &[RatingSource] {
        &self.rating_sources
    }

    /// Whether [`Catalog::reviews`] can return anything.
    #[must_use]
    pub const fn has_reviews(&self) -> bool {
        self.nytimes.is_some()
    }

    /// Searches the catalog by free text.
    ///
    /// A blank `query` returns an empty list without making a request.
    ///
    /// # Errors
    ///
    /// [`Error::Search`] is returned when the request to the catalog fails for any reason.
    pub fn search(&self, query: &str) -> Result<Vec<Book>, Error> {
        self.search_page(query, 0).map(|page| page.books)
    }

    /// Searches the catalog by free text, starting at the `start_index`th match.
    ///
    /// A blank `query` returns an empty page without making a request.
    ///
    /// # Errors
    ///
    /// [`Error::Search`] is returned when the request to the catalog fails for any reason.
    pub fn search_page(&self, query: &str, start_index: u32) -> Result<SearchPage, Error> {
        let query = query.trim();
        if query.is_empty() {
            trace!("Blank search query - skipping request");
            return Ok(SearchPage::default());
        }

        google_books::search_volumes(
            &self.client,
            &self.catalog_url,
            query,
            self.max_results,
            start_index,
        )
        .map_err(|e| {
            error!("Error searching books: {e}");
            Error::Search
        })
    }

    /// Fetches a single book by its catalog id.
    ///
    /// # Errors
    ///
    /// [`Error::MissingId`] is returned when `id` is blank.
    /// [`Error::NotFound`] is returned when the catalog reports no such book.
    /// [`Error::Lookup`] is returned for any other failure.
    pub fn lookup(&self, id: &str) -> Result<Book, Error> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::MissingId);
        }

        google_books::get_volume(&self.client, &self.catalog_url, id).map_err(|e| {
            error!("Error fetching book details: {e}");
            if e.is_not_found() {
                Error::NotFound(id.to_owned())
            } else {
                Error::Lookup
            }
        })
    }

    /// Looks up a rating for `isbn`, returning the first one found across the rating sources.
    ///
    /// Ratings are best-effort: an empty `isbn`, a book unknown to every source, a book without
    /// ratings and a failing provider all yield [`None`]. A rating of zero is returned as such.
    #[must_use]
    pub fn ratings(&self, isbn: &str) -> Option<Rating> {
        let isbn = clean_isbn(isbn)?;
        self.rating_sources
            .iter()
            .find_map(|&source| self.rating_from(source, &isbn))
    }

    /// Looks up `isbn` in every rating source and returns all the ratings found.
    #[must_use]
    pub fn all_ratings(&self, isbn: &str) -> Vec<Rating> {
        clean_isbn(isbn).map_or_else(Vec::new, |isbn| {
            self.rating_sources
                .iter()
                .filter_map(|&source| self.rating_from(source, &isbn))
                .collect()
        })
    }

    /// Fetches published reviews for `isbn`.
    ///
    /// Empty without a request when no New York Times api key is configured or `isbn` is empty.
    /// Failures are logged and yield an empty list.
    #[must_use]
    pub fn reviews(&self, isbn: &str) -> Vec<Review> {
        let (nytimes, isbn) = match (&self.nytimes, clean_isbn(isbn)) {
            (Some(nytimes), Some(isbn)) => (nytimes, isbn),
            _ => return Vec::new(),
        };

        nytimes::get_reviews(&self.client, &nytimes.url, &nytimes.api_key, &isbn)
            .unwrap_or_else(|e| {
                warn!("Error fetching New York Times reviews: {e}");
                Vec::new()
            })
    }

    fn rating_from(&self, source: RatingSource, isbn: &str) -> Option<Rating> {
        let res: Result<Option<Rating>, TransportError> = match source {
            RatingSource::GoogleBooks => {
                google_books::get_rating(&self.client, &self.catalog_url, isbn)
            }
            RatingSource::OpenLibrary => {
                open_library::get_rating(&self.client, &self.open_library_url, isbn)
            }
        };

        res.unwrap_or_else(|e| {
            if e.is_not_found() {
                trace!("{} has no entry for ISBN '{isbn}'", source.name());
            } else {
                warn!("Error fetching ratings from {}: {e}", source.name());
            }
            None
        })
    }
}

// remove whitespace and hyphens from ISBN-13 (if applicable)
fn clean_isbn(isbn: &str) -> Option<String> {
    let isbn: String = isbn
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();
    if isbn.is_empty() {
        None
    } else {
        Some(isbn)
    }
}
