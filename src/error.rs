//! Error types for scriptmark.

use std::io;
use thiserror::Error;

/// Result type alias for scriptmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while capturing, composing or submitting regions.
#[derive(Error, Debug)]
pub enum Error {
    /// A user action was rejected without changing any state
    /// (selection too small, part-tree limit reached, empty submission).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A document, exam or question the flow depends on does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The current user may not work on the requested document.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// A server call failed or returned a non-success status.
    #[error("Network error: {0}")]
    Network(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// One or more question payloads were rejected by the server.
    #[error("Submission failed for questions {failed:?}")]
    Submission {
        /// Display numbers of the questions whose submission failed
        failed: Vec<u32>,
    },

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Raster decode or encode failure.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Malformed data URI or base64 payload.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Caption font could not be loaded.
    #[error("Font error: {0}")]
    Font(String),

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A background image load did not complete.
    #[error("Task error: {0}")]
    Task(String),
}

impl Error {
    /// Shorthand for a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Shorthand for a not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Whether this error came from talking to the server.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Http(_) | Error::Submission { .. }
        )
    }

    /// Whether the flow can continue after showing this error to the user.
    ///
    /// Validation failures leave state untouched; not-found and permission
    /// errors block the capture flow.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::NotFound(_) | Error::Permission(_))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<ab_glyph::InvalidFont> for Error {
    fn from(err: ab_glyph::InvalidFont) -> Self {
        Error::Font(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}
