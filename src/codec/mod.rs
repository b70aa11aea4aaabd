//! Image codec adapter
//!
//! Handles the byte-level edges of the pipeline: decoding uploaded bytes
//! into pixel buffers (alpha preserved) and encoding composited buffers
//! back to the single JPEG output format at a caller-chosen quality.

use std::fmt;
use std::io::Cursor;

use image::io::Reader as ImageReader;
use image::DynamicImage;

/// Errors that can occur during image decoding or encoding
#[derive(Debug, Clone)]
pub enum CodecError {
    /// Image bytes are not a recognized raster format, or are truncated/corrupt
    DecodeFailed { message: String },
    /// Encoding to the output format failed
    EncodeFailed { message: String },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::DecodeFailed { message } => {
                write!(f, "Failed to decode image: {}", message)
            }
            CodecError::EncodeFailed { message } => {
                write!(f, "Failed to encode to jpeg: {}", message)
            }
        }
    }
}

impl std::error::Error for CodecError {}

impl CodecError {
    pub fn decode_failed(message: impl Into<String>) -> Self {
        CodecError::DecodeFailed {
            message: message.into(),
        }
    }

    pub fn encode_failed(message: impl Into<String>) -> Self {
        CodecError::EncodeFailed {
            message: message.into(),
        }
    }

    /// Maps codec errors to HTTP status codes
    ///
    /// Status mapping:
    /// - DecodeFailed → 400 (Bad Request)
    /// - EncodeFailed → 500 (Internal Server Error)
    pub fn to_http_status(&self) -> u16 {
        match self {
            CodecError::DecodeFailed { .. } => 400,
            CodecError::EncodeFailed { .. } => 500,
        }
    }
}

/// Decode image bytes into a pixel buffer.
///
/// The format is guessed from the content (JPEG and PNG are compiled in).
/// Alpha information is preserved when the source carries it.
pub fn decode(data: &[u8]) -> Result<DynamicImage, CodecError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| CodecError::decode_failed(e.to_string()))?
        .decode()
        .map_err(|e| CodecError::decode_failed(e.to_string()))
}

/// Encode a pixel buffer as JPEG at the given quality (1-100, clamped).
///
/// The output never carries an alpha channel: RGBA input is flattened to
/// RGB before encoding.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, CodecError> {
    use image::codecs::jpeg::JpegEncoder;
    use image::ImageEncoder as _;

    let rgb = image.to_rgb8();

    let mut output = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100));

    encoder
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), image::ColorType::Rgb8)
        .map_err(|e| CodecError::encode_failed(e.to_string()))?;

    Ok(output.into_inner())
}
