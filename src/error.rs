//! Error types
//!
//! `ConfigError` covers everything that can go wrong before the listener is
//! bound. `ServeError` covers per-request failures that are turned into
//! HTML error pages instead of propagating.

use hyper::StatusCode;
use thiserror::Error;

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port argument is not an integer in `1..=65535`
    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    /// The executable's directory could not be determined
    #[error("Cannot resolve serving directory: {0}")]
    Root(#[source] std::io::Error),
}

/// Per-request errors, rendered as error pages
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServeError {
    #[error("File not found")]
    NotFound,

    #[error("No permission to list directory")]
    ListingDenied,

    #[error("Unsupported method ('{0}')")]
    UnsupportedMethod(String),
}

impl ServeError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::ListingDenied => StatusCode::NOT_FOUND,
            Self::UnsupportedMethod(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }

    /// Long-form explanation shown on the error page
    pub const fn explain(&self) -> &'static str {
        match self {
            Self::NotFound | Self::ListingDenied => "Nothing matches the given URI",
            Self::UnsupportedMethod(_) => "Server does not support this operation",
        }
    }
}
