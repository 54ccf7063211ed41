//! Error types for the cardscrape-core library.

use thiserror::Error;

/// Main error type for the cardscrape library.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Fetching a catalog page failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A card at a given cursor position failed extraction.
    ///
    /// Only the card is lost; the crawl can continue with the next cursor.
    #[error("card at cursor {cursor} ({url}): {source}")]
    Card {
        cursor: u64,
        url: String,
        #[source]
        source: ExtractionError,
    },

    /// Invalid URL in configuration or input.
    #[error("invalid URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Reading or writing a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed or serialized.
    #[error("configuration error in {path}: {reason}")]
    Config { path: String, reason: String },
}

/// Errors raised by a [`Fetcher`](crate::fetch::Fetcher).
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, timeout, ...).
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a status that is neither success nor the
    /// end-of-results redirect.
    #[error("unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Errors raised while interpreting the table of a card page.
///
/// All of these mean the source broke one of its own conventions, so the
/// value is never coerced into something plausible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A boolean field held something other than `Yes` or `No`.
    #[error("unexpected value for boolean field {field}: {value:?}")]
    MalformedBoolean { field: String, value: String },

    /// A link was present but did not carry the expected query parameter.
    #[error("link {link:?} of field {field} has no query parameter {parameter}")]
    MissingQueryParameter {
        field: String,
        parameter: String,
        link: String,
    },

    /// An identifier query parameter was not an integer.
    #[error("identifier {value:?} of field {field} is not an integer")]
    InvalidIdentifier { field: String, value: String },

    /// A collection string had no balanced leading `(CODE)` group.
    #[error("collection string has no balanced code group: {0:?}")]
    UnbalancedCollection(String),

    /// A transfer date row appeared without a pending transfer place.
    #[error("transfer date {0:?} has no preceding transfer place")]
    OrphanTransferDate(String),

    /// A transfer place row had no value cell.
    #[error("transfer place row has no value cell")]
    MissingTransferPlace,

    /// The page URL did not carry the card identifier.
    #[error("page URL {url:?} has no {parameter} parameter")]
    MissingCardId { url: String, parameter: String },
}

/// Result type for the cardscrape library.
pub type Result<T> = std::result::Result<T, ScrapeError>;
