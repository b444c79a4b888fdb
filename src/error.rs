//! Error types for the asset decoders.

use thiserror::Error;

/// Result type alias using DecodeError.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Main error type for model and texture decoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input buffer ended before a required field could be read.
    #[error("truncated input: needed {needed} byte(s) at offset {offset}, {remaining} remaining")]
    TruncatedInput {
        /// Absolute offset of the failed read.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A length or enum field implies an inconsistent record.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The texture header indicates a layout the codec does not support.
    ///
    /// Dimensions are read from the header before the format flag, so they
    /// are reported even though no pixels are decoded.
    #[error("unsupported texture format ({width}x{height})")]
    UnsupportedFormat {
        /// Texture width from the header.
        width: i32,
        /// Texture height from the header.
        height: i32,
    },

    /// I/O error while reading a source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode a decoded texture as an image.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
