//! Error types for vizcrate

use thiserror::Error;

/// Main error type for vizcrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Image is empty")]
    EmptyImage,

    #[error("Unsupported image depth: {depth}, expected u8")]
    UnsupportedDepth { depth: &'static str },

    #[error("Unsupported image channel count: {channels}, expected 1, 3 or 4")]
    UnsupportedChannels { channels: usize },

    #[error(
        "Unsupported point format: {depth} with {channels} channels, \
         expected f32 or f64 with 3 or 4 channels"
    )]
    UnsupportedPointFormat { depth: &'static str, channels: usize },

    #[error("Display object mismatch: expected {expected}, found {found}")]
    PropMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Widget kind mismatch: expected {expected}, found {found}")]
    WidgetKind {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type alias for vizcrate operations
pub type Result<T> = std::result::Result<T, Error>;
