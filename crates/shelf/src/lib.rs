#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # shelf
//!
//! shelf searches a public book catalog (Google Books) and maps its loosely structured volumes
//! into stable [`Book`] records. Ratings for a book can be looked up by ISBN from one or more
//! best-effort [`RatingSource`]s, and reviews from the New York Times when an api key is
//! configured.
//!
//! ```no_run
//! use shelf::{Catalog, Config};
//!
//! let catalog = Catalog::new(Config::default());
//! for book in catalog.search("dune")? {
//!     let rating = book.isbn.as_deref().and_then(|isbn| catalog.ratings(isbn));
//!     println!("{} by {} ({:?})", book.title, book.author, rating.map(|r| r.value));
//! }
//! # Ok::<(), shelf::Error>(())
//! ```

mod api;
mod catalog;
mod error;
pub mod model;
pub mod normalize;
mod session;

pub use api::Client;
pub use catalog::{Catalog, Config, RatingSource, DEFAULT_MAX_RESULTS};
pub use error::{Error, TransportError, TransportErrorKind};
pub use model::{Book, Rating, Review, SearchPage};
pub use session::{SearchOutcome, SearchSession, Ticket};
