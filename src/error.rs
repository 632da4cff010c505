//! Error types for the cellfit library

use thiserror::Error;

/// Result type alias using LayoutError
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while sizing cells and placing media
#[derive(Debug, Error)]
pub enum LayoutError {
    /// No metrics table entry exists for the font size
    #[error("No font metrics for {0}pt (supported range is 5-21pt)")]
    OutOfRangeFontSize(u16),

    /// A placement rectangle has a negative offset
    #[error("Invalid position: offsets must be >= 0, got ({dx1}, {dy1}, {dx2}, {dy2})")]
    InvalidPosition {
        dx1: i64,
        dy1: i64,
        dx2: i64,
        dy2: i64,
    },

    /// Error from the underlying document model (asset registration, object embedding,
    /// serialization)
    #[error("Document operation failed: {0}")]
    Document(#[from] std::io::Error),

    /// Image payload could not be decoded to read its dimensions
    #[error("Image decoding failed: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Sheet index out of range
    #[error("Sheet at index {0} does not exist")]
    SheetNotFound(usize),

    /// Malformed A1-style range
    #[error("Invalid cell range: {0}")]
    InvalidCellRange(String),
}
