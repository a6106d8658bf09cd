use log::{info, trace};
use reqwest::Url;
use serde::Deserialize;

use crate::{model::Review, TransportError};

use super::{endpoint, Client};

pub(crate) const NYTIMES_URL: &str = "https://api.nytimes.com/svc/books/v3";
pub(crate) const SOURCE: &str = "The New York Times";

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct ReviewsModel {
    #[serde(default)]
    results: Option<Vec<ReviewItem>>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct ReviewItem {
    url: Option<String>,
    byline: Option<String>,
    summary: Option<String>,
    publication_dt: Option<String>,
}

pub(crate) fn reviews_url(base: &str, api_key: &str, isbn: &str) -> Result<Url, TransportError> {
    let mut url = endpoint(base, &["reviews.json"])?;
    url.query_pairs_mut()
        .append_pair("isbn", isbn)
        .append_pair("api-key", api_key);
    Ok(url)
}

pub(crate) fn get_reviews<C: Client>(
    client: &C,
    base: &str,
    api_key: &str,
    isbn: &str,
) -> Result<Vec<Review>, TransportError> {
    info!("Searching reviews for ISBN '{isbn}' using New York Times API");
    let url = reviews_url(base, api_key, isbn)?;
    // the url carries the credential
    trace!("GET {base}/reviews.json?isbn={isbn}");

    let ReviewsModel { results } = client.get_json(url.as_str())?;

    Ok(results
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| {
            let ReviewItem {
                url,
                byline,
                summary,
                publication_dt,
            } = item;

            // a review without a link cannot be shown
            url.filter(|u| !u.is_empty()).map(|url| Review {
                source: SOURCE.to_owned(),
                url,
                byline: byline.filter(|s| !s.is_empty()),
                summary: summary.filter(|s| !s.is_empty()),
                published: publication_dt.filter(|s| !s.is_empty()),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use crate::api::{impl_json_producer, MockJsonClient};

    use super::*;

    impl_json_producer! {
        ReviewsProducer => |url| Ok(include_str!("../../../../tests/data/nytimes_reviews.json").to_owned()),
        NoResultsProducer => |url| Ok(r#"{ "status": "OK", "num_results": 0, "results": [] }"#.to_owned()),
        LinklessProducer => |url| Ok(r#"{ "results": [{ "byline": "X", "url": "" }] }"#.to_owned()),
    }

    #[test]
    fn reviews_url_carries_isbn_and_key() {
        assert_eq!(
            "https://api.nytimes.com/svc/books/v3/reviews.json?isbn=9780441013593&api-key=secret",
            reviews_url(NYTIMES_URL, "secret", "9780441013593")
                .unwrap()
                .as_str()
        );
    }

    #[test]
    fn failed_reviews_request_keeps_api_key_out_of_error() {
        let client = reqwest::blocking::Client::new();
        let err = get_reviews(&client, "https://127.0.0.1:9", "supersecret", "9780441013593")
            .unwrap_err();
        assert!(!err.to_string().contains("supersecret"));
    }

    #[test]
    fn reviews_are_mapped() {
        let client = MockJsonClient::<ReviewsProducer>::default();
        let reviews = get_reviews(&client, NYTIMES_URL, "secret", "9780441013593").unwrap();

        assert_eq!(
            vec![Review {
                source: "The New York Times".to_owned(),
                url: "http://www.nytimes.com/1965/10/03/books/dune.html".to_owned(),
                byline: Some("JOHN DOE".to_owned()),
                summary: Some("A desert planet and the spice that rules it.".to_owned()),
                published: Some("1965-10-03".to_owned()),
            }],
            reviews
        );
    }

    #[test]
    fn empty_or_linkless_results_yield_no_reviews() {
        let client = MockJsonClient::<NoResultsProducer>::default();
        assert!(get_reviews(&client, NYTIMES_URL, "k", "0").unwrap().is_empty());

        let client = MockJsonClient::<LinklessProducer>::default();
        assert!(get_reviews(&client, NYTIMES_URL, "k", "0").unwrap().is_empty());
    }
}
