//! Unified error handling for the ucpnz crate
//!
//! This module provides a unified error type that consolidates the stage
//! errors into a single `Error` enum, while keeping the stage errors usable
//! on their own.
//!
//! # Architecture
//!
//! - [`UcpnzErrorTrait`] - Common interface implemented by the error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use ucpnz::error::{Error, UcpnzErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     if err.is_stale() {
//!         return; // skip, not a failure
//!     }
//!     if err.is_recoverable() {
//!         println!("Retry later: {err}");
//!     } else {
//!         eprintln!("Fatal error: {err}");
//!     }
//! }
//! ```

use std::io;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

pub use crate::utils::error::{FetchError, ParseError};

/// Common trait for all ucpnz error types
pub trait UcpnzErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried by the caller)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// Article rejected by a filter, not a failure
    Filtered,
    /// Lookup in the stored collection failed
    Lookup,
    /// Storage and I/O errors
    Storage,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Filtered => "filtered",
            Self::Lookup => "lookup",
            Self::Storage => "storage",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unified error type for the ucpnz crate
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Parse-specific errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Article is older than the recency window
    #[error("article update time out of range: {update_time} is more than {days} days old")]
    TimeOverDays {
        update_time: DateTime<FixedOffset>,
        days: i64,
    },

    /// No stored article carries the requested id
    #[error("[{site}] no article with id: {id}, url: {origin}")]
    NotFound {
        site: String,
        id: String,
        origin: String,
    },

    /// An article with the same title is already stored
    #[error("article title exist: {0}")]
    DuplicateTitle(String),

    /// Markdown template errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl UcpnzErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Parse(_) => false,
            Self::TimeOverDays { .. } => false,
            Self::NotFound { .. } => false,
            Self::DuplicateTitle(_) => false,
            Self::Template(_) => false,
            Self::Io(_) => true, // I/O errors are often transient
            Self::Json(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(_) => ErrorCategory::Network,
            Self::Parse(_) | Self::Template(_) => ErrorCategory::Parsing,
            Self::TimeOverDays { .. } | Self::DuplicateTitle(_) => ErrorCategory::Filtered,
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::Io(_) | Self::Json(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// True for the stale-article condition callers skip instead of report
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::TimeOverDays { .. })
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::with_source("Failed to register markdown template", err)
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stale() -> Error {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        Error::TimeOverDays {
            update_time: offset.with_ymd_and_hms(2021, 2, 5, 10, 0, 0).unwrap(),
            days: 3,
        }
    }

    #[test]
    fn test_error_category() {
        let fetch_err = Error::Fetch(FetchError::Timeout);
        assert_eq!(fetch_err.category(), ErrorCategory::Network);

        let parse_err = Error::Parse(ParseError::TitleNotFound);
        assert_eq!(parse_err.category(), ErrorCategory::Parsing);

        assert_eq!(stale().category(), ErrorCategory::Filtered);
    }

    #[test]
    fn test_is_recoverable() {
        let fetch_err = Error::Fetch(FetchError::Timeout);
        assert!(fetch_err.is_recoverable());

        let parse_err = Error::Parse(ParseError::TitleNotFound);
        assert!(!parse_err.is_recoverable());
    }

    #[test]
    fn test_stale_is_distinguished() {
        assert!(stale().is_stale());
        assert!(!Error::Parse(ParseError::ContentNotFound).is_stale());
        assert!(!Error::Fetch(FetchError::Timeout).is_stale());
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::NotFound {
            site: "UCPNZ".to_string(),
            id: "abc".to_string(),
            origin: "https://ucpnz.co.nz/a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "[UCPNZ] no article with id: abc, url: https://ucpnz.co.nz/a"
        );
        assert_eq!(err.category(), ErrorCategory::Lookup);
    }

    #[test]
    fn test_error_conversion() {
        let unified: Error = ParseError::DateNotFound.into();
        assert!(matches!(unified, Error::Parse(_)));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("empty domain");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(!err.is_recoverable());
    }
}
