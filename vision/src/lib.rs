//! Client-side logic for the Cloud Vision `images:annotate` endpoint.
//!
//! [`prepare`] turns an image into a size-bounded base64 PNG,
//! [`AnnotateRequest`] wraps it in a request body, and [`interpret`] reduces
//! the response to a single [`Summary`]. Nothing here performs I/O.

pub mod emotion;
pub mod error;
pub mod interpret;
pub mod likelihood;
pub mod prepare;
pub mod request;
pub mod summary;

pub use emotion::{Emotion, EmotionBreakdown};
pub use error::{Result, VisionError};
pub use interpret::{LABEL_SCORE_THRESHOLD, interpret};
pub use likelihood::Likelihood;
pub use prepare::{
    EncodedPayload, LineBreaks, MAX_PAYLOAD_BYTES, MAX_REDRAW_PIXELS, PrepareOptions,
    TARGET_WIDTH, prepare, prepare_with,
};
pub use request::{AnnotateRequest, Feature, FeatureType};
pub use summary::{ApiError, LabelSummary, NOTHING_DETECTED, Summary};
