//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping catalog errors
/// and adding configuration and input validation failures.
#[derive(Debug)]
pub enum GalleryError {
    /// An error from the underlying catalog client.
    Api(picsum_api::Error),
    /// Configuration could not be read or parsed.
    Config(String),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Config(msg) => write!(f, "Config error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for GalleryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<picsum_api::Error> for GalleryError {
    fn from(e: picsum_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<LoadError> for GalleryError {
    fn from(e: LoadError) -> Self {
        Self::Api(e.source)
    }
}

/// A failed fetch as shown to the user: a plain message plus the catalog
/// error that caused it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LoadError {
    message: String,
    source: picsum_api::Error,
}

impl LoadError {
    pub const PAGE_MESSAGE: &'static str = "Failed to load photos. Please try again.";
    pub const DETAIL_MESSAGE: &'static str = "Failed to load photo details. Please try again.";

    /// A listing page could not be fetched.
    pub fn page(source: picsum_api::Error) -> Self {
        Self {
            message: Self::PAGE_MESSAGE.to_string(),
            source,
        }
    }

    /// A single photo could not be fetched.
    pub fn detail(source: picsum_api::Error) -> Self {
        Self {
            message: Self::DETAIL_MESSAGE.to_string(),
            source,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &picsum_api::Error {
        &self.source
    }

    /// HTTP status of the failed request, if the server answered.
    pub fn status(&self) -> Option<u16> {
        self.source.status()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.source, picsum_api::Error::NotFound { .. })
    }
}
