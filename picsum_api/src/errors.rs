//! Error types for the catalog client.

/// Errors that can occur when making catalog requests.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unparseable response).
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    /// The catalog returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The catalog has no photo with this id.
    #[error("Photo {id} not found")]
    NotFound { id: String },
}

impl Error {
    /// HTTP status associated with the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { .. } => None,
            Error::HttpStatus { status, .. } => Some(*status),
            Error::NotFound { .. } => Some(404),
        }
    }

    pub(crate) fn request_failed(message: impl Into<String>) -> Self {
        Error::RequestFailed {
            message: message.into(),
        }
    }
}
