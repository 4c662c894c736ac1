use thiserror::Error;

/// Failures raised while preparing an image or reading a vision response.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("image could not be encoded as PNG: {0}")]
    ImageEncode(#[from] image::ImageError),
    #[error("redrawing at {width}x{height} exceeds the {max_pixels} pixel limit")]
    TooLarge { width: u32, height: u32, max_pixels: u64 },
    #[error("malformed vision response: {0}")]
    Parse(String),
    #[error("face {face}: {field} is {value:?}, which is not a known likelihood")]
    DataIntegrity {
        /// Position of the face record in `faceAnnotations`.
        face: usize,
        field: &'static str,
        /// Category string as received; `None` when the field was absent.
        value: Option<String>,
    },
    #[error("request serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, VisionError>;
