use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the image operations and the editor controller.
///
/// The edit history never fails; every error here is raised before the
/// history is touched, so a failed action leaves it exactly as it was.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Image does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image to {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filter not available: {0}")]
    UnsupportedFilter(String),

    #[error("Unknown tint color: {0}")]
    UnsupportedColor(String),

    #[error("Width and height must be positive integers (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No image is open")]
    NoImage,

    #[error("No save path is known for the current image")]
    NoSavePath,
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
