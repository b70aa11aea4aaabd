//! Watermark error types.
//!
//! Defines errors that can occur during watermark processing. None of these
//! are surfaced over HTTP: the shell treats any of them as a signal to fall
//! back to the unmodified upload.

use std::fmt;

/// Errors that can occur during watermark processing.
#[derive(Debug)]
pub enum WatermarkError {
    /// Overlay asset file absent at its configured path
    AssetMissing(String),

    /// Failed to decode the base image or an overlay asset
    DecodeError(String),

    /// Failed to composite overlays onto the base image
    CompositeError(String),

    /// Failed to encode the composited result
    EncodeError(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetMissing(path) => write!(f, "Overlay asset not found: {}", path),
            Self::DecodeError(msg) => write!(f, "Failed to decode image: {}", msg),
            Self::CompositeError(msg) => write!(f, "Failed to composite overlay: {}", msg),
            Self::EncodeError(msg) => write!(f, "Failed to encode result: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}
