// Error types module

use std::fmt;

/// Centralized error type for the HTTP shell
///
/// Categorizes errors into the 4 main types the upload endpoints can
/// produce, for appropriate HTTP status code mapping.
#[derive(Debug, Clone)]
pub enum ServerError {
    /// Request validation failures (missing `image` field, empty payload)
    Validation(String),

    /// Image bytes could not be decoded (malformed base64, corrupt image)
    Decode(String),

    /// Requested file or route does not exist
    NotFound,

    /// Internal errors (file I/O, encoding failures, unexpected errors)
    Internal(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Validation(msg) => write!(f, "{}", msg),
            ServerError::Decode(msg) => write!(f, "{}", msg),
            ServerError::NotFound => write!(f, "Not found"),
            ServerError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl ServerError {
    /// Maps errors to HTTP status codes
    ///
    /// Status mapping:
    /// - Validation → 400 (Bad Request)
    /// - Decode → 500 (the upload endpoints surface decode failures as
    ///   processing errors, not client errors)
    /// - NotFound → 404
    /// - Internal → 500
    pub fn to_http_status(&self) -> u16 {
        match self {
            ServerError::Validation(_) => 400,
            ServerError::Decode(_) => 500,
            ServerError::NotFound => 404,
            ServerError::Internal(_) => 500,
        }
    }
}
