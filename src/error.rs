use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the validating entry points.
///
/// The raw C exports never surface these; they log and return instead.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("buffer length {len} doesn't match {width}x{height}x4 = {expected}")]
    LengthMismatch {
        len: usize,
        width: u32,
        height: u32,
        expected: usize,
    },

    #[error("image dimensions {width}x{height} overflow the addressable buffer size")]
    DimensionOverflow { width: u32, height: u32 },

    #[error("negative image dimensions {width}x{height}")]
    NegativeDimension { width: i32, height: i32 },

    #[error("null pixel buffer")]
    NullBuffer,

    #[error("invalid hex color `{0}` (expected #rrggbb)")]
    InvalidHexColor(String),

    #[error("pixel ({x}, {y}) is outside the {width}x{height} image")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("queue is full ({0} images max)")]
    QueueFull(usize),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error on `{0}`: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
