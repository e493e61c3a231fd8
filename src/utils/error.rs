//! Error types for the extraction stages
//!
//! This module defines the fetch and parse errors raised by the individual
//! pipeline stages. The unified [`crate::error::Error`] wraps both.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status code
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Content decoding error
    #[error("Decoding error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Transient failures an outside caller may choose to retry.
    ///
    /// The fetcher itself never retries.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout => true,
            Self::ServerError(status) => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Decode(_) => false,
        }
    }
}

/// Errors that can occur during parsing operations
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input URL could not be parsed
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Document has no `<title>` element
    #[error("there is no element <title>")]
    TitleNotFound,

    /// Date-bearing element is absent
    #[error("date element not found")]
    DateNotFound,

    /// Date element exists but carries no timestamp attribute
    #[error("date element has no datetime value")]
    TimestampMissing,

    /// Timestamp attribute is not RFC 3339
    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Content container yielded no paragraphs
    #[error("no <p> matched")]
    ContentNotFound,

    /// Percent-escaped text could not be decoded
    #[error("invalid URL escape: {0}")]
    Unescape(String),
}
