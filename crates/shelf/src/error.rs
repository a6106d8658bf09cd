pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The error returned by a [`Client`][crate::api::Client] when a request to a provider fails.
///
/// These errors never reach callers of [`Catalog`][crate::Catalog]: they are logged and then
/// replaced by an [`Error`] or swallowed, depending on the operation.
#[derive(Debug)]
pub struct TransportError {
    kind: TransportErrorKind,
    status: Option<u16>,
    message: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up a [`TransportError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The url was not a fully-qualified https url.
    InvalidUrl,
    /// The request could not be sent or the connection failed.
    IO,
    /// The provider answered with a non-2xx status.
    Status,
    /// The response body was not valid JSON for the expected shape.
    Deserialize,
}

impl TransportError {
    /// Creates a new [`TransportError`] based on the [`TransportErrorKind`] and message to
    /// describe the error.
    pub fn new<S: Into<String>>(kind: TransportErrorKind, message: S) -> Self {
        Self {
            kind,
            status: None,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`TransportError`].
    pub fn wrap<E>(kind: TransportErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            status: None,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Creates a [`TransportErrorKind::Status`] error for a response with the given status code.
    #[must_use]
    pub fn status_code(status: u16) -> Self {
        Self {
            kind: TransportErrorKind::Status,
            status: Some(status),
            message: Some(format!("provider responded with status {status}")),
            source: None,
        }
    }

    /// Attaches a status code to the error.
    #[must_use]
    pub const fn with_status(mut self, status: Option<u16>) -> Self {
        self.status = status;
        self
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// The HTTP status code of the failed response, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether the provider reported that the requested resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TransportErrorKind::InvalidUrl => f.write_str("Invalid url error")?,
            TransportErrorKind::IO => f.write_str("IO error")?,
            TransportErrorKind::Status => f.write_str("Status error")?,
            TransportErrorKind::Deserialize => f.write_str("Deserialize error")?,
        };

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(cause) = &self.source {
            write!(f, ": caused by {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}

/// The errors surfaced to callers of [`Catalog`][crate::Catalog].
///
/// The messages are meant to be shown to a user as is; the underlying cause is only logged.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A free-text search failed.
    Search,
    /// Fetching a single book failed.
    Lookup,
    /// The provider has no book with this id.
    NotFound(String),
    /// A lookup was attempted with a blank id.
    MissingId,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search => f.write_str("Failed to search books. Please try again."),
            Self::Lookup => f.write_str("Failed to fetch book details. Please try again."),
            Self::NotFound(id) => write!(f, "No book found with the id '{id}'."),
            Self::MissingId => f.write_str("A book id is required."),
        }
    }
}

impl std::error::Error for Error {}

#[test]
fn transport_error_display_includes_message_and_cause() {
    let err = TransportError::new(TransportErrorKind::IO, "Network error");
    assert_eq!("IO error: Network error", err.to_string());

    let err = TransportError::wrap(
        TransportErrorKind::Deserialize,
        TransportError::new(TransportErrorKind::IO, "inner"),
    );
    assert_eq!(
        "Deserialize error: caused by IO error: inner",
        err.to_string()
    );
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn status_errors_record_the_status_code() {
    let err = TransportError::status_code(404);
    assert_eq!(TransportErrorKind::Status, err.kind());
    assert_eq!(Some(404), err.status());
    assert!(err.is_not_found());
    assert!(!TransportError::status_code(500).is_not_found());
}

#[test]
fn search_error_message_is_user_facing() {
    assert_eq!(
        "Failed to search books. Please try again.",
        Error::Search.to_string()
    );
}
