use log::{info, trace};
use serde::Deserialize;

use crate::{model::Rating, TransportError};

use super::{endpoint, Client};

pub(crate) const OPEN_LIBRARY_URL: &str = "https://openlibrary.org";
pub(crate) const SOURCE: &str = "Open Library";
const MAX_RATING: f64 = 5.0;

/// The part of an Open Library edition needed to find its work.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Edition {
    #[serde(default)]
    works: Vec<WorkRef>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct WorkRef {
    key: String,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Ratings {
    summary: Option<Summary>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Summary {
    average: Option<f64>,
    count: Option<u64>,
}

/// Ratings are kept per work, so the edition is resolved first and the ratings of its first work
/// are read.
pub(crate) fn get_rating<C: Client>(
    client: &C,
    base: &str,
    isbn: &str,
) -> Result<Option<Rating>, TransportError> {
    info!("Searching rating for ISBN '{isbn}' using Open Library API");
    let edition = format!("{isbn}.json");
    let url = endpoint(base, &["isbn", edition.as_str()])?;
    trace!("GET {url}");

    let Edition { works } = client.get_json(url.as_str())?;
    let work = match works.first().and_then(|w| work_id(&w.key)) {
        Some(work) => work,
        None => {
            trace!("Edition for ISBN '{isbn}' has no work");
            return Ok(None);
        }
    };

    let url = endpoint(base, &["works", work, "ratings.json"])?;
    trace!("GET {url}");

    let Ratings { summary } = client.get_json(url.as_str())?;

    Ok(summary.and_then(|Summary { average, count }| {
        average.map(|value| Rating {
            source: SOURCE.to_owned(),
            value,
            max_value: MAX_RATING,
            review_count: count,
        })
    }))
}

// "/works/OL893415W" -> "OL893415W"
fn work_id(key: &str) -> Option<&str> {
    key.rsplit('/').next().filter(|id| !id.is_empty())
}
