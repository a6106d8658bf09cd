use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

pub(crate) mod google_books;
pub(crate) mod nytimes;
pub(crate) mod open_library;

use crate::{TransportError, TransportErrorKind};

/// The transport used to talk to the book providers.
///
/// A [`Client`] only fetches and decodes JSON; it performs no schema validation and no retries.
/// A failed call surfaces immediately as a [`TransportError`].
pub trait Client {
    /// Issues a GET request to `url` and decodes the JSON body.
    ///
    /// The `url` must be a fully-qualified https url with any query parameters already
    /// percent-encoded.
    ///
    /// # Errors
    ///
    /// An [`Err`] is returned when the url is not https, the request fails, the provider responds
    /// with a non-2xx status or the body cannot be decoded.
    fn get_json<T>(&self, url: &str) -> Result<T, TransportError>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        // urls are kept out of errors, their query may carry an api key
        let url = parse_https_url(url)?;
        let resp = self
            .get(url)
            .send()
            .map_err(|e| {
                let status = e.status().map(|s| s.as_u16());
                TransportError::wrap(TransportErrorKind::IO, e.without_url()).with_status(status)
            })?;

        check_status(resp.status())?;

        resp.json()
            .map_err(|e| TransportError::wrap(TransportErrorKind::Deserialize, e.without_url()))
    }
}

/// Maps any non-2xx status to a [`TransportErrorKind::Status`] error.
pub(crate) fn check_status(status: StatusCode) -> Result<(), TransportError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(TransportError::status_code(status.as_u16()))
    }
}

/// Parses `url` and rejects anything that is not https.
pub(crate) fn parse_https_url(url: &str) -> Result<Url, TransportError> {
    let parsed = Url::parse(url).map_err(|e| TransportError::wrap(TransportErrorKind::InvalidUrl, e))?;
    if parsed.scheme() == "https" {
        Ok(parsed)
    } else {
        Err(TransportError::new(
            TransportErrorKind::InvalidUrl,
            format!("Only https urls are supported, found '{}'", parsed.scheme()),
        ))
    }
}

/// Joins `path` segments onto a base url, percent-encoding each segment.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url, TransportError> {
    let mut url = parse_https_url(base)?;
    url.path_segments_mut()
        .map_err(|_| {
            TransportError::new(
                TransportErrorKind::InvalidUrl,
                format!("The url '{base}' cannot be used as a base"),
            )
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
pub(crate) use test::{impl_json_producer, MockJsonClient, NetworkErrorProducer, Producer};
