use crate::emotion::EmotionBreakdown;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown when neither faces nor a confident label were found.
pub const NOTHING_DETECTED: &str = "No face or object accurately detected";

/// Error object reported by the annotate endpoint itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: Option<i64>,
    pub message: Option<String>,
    /// Canonical status name such as `INVALID_ARGUMENT`.
    pub status: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "Error code {code}")?,
            None => f.write_str("Error")?,
        }
        if let Some(status) = &self.status {
            write!(f, " ({status})")?;
        }
        write!(f, ": {}", self.message.as_deref().unwrap_or("no message"))
    }
}

impl std::error::Error for ApiError {}

/// Top label that cleared the confidence threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelSummary {
    pub description: String,
    pub score: f64,
}

/// The one interpretation produced for a response.
#[derive(Clone, Debug, PartialEq)]
pub enum Summary {
    Faces(EmotionBreakdown),
    Label(LabelSummary),
    Nothing,
    Error(ApiError),
}

impl Summary {
    pub fn is_error(&self) -> bool {
        matches!(self, Summary::Error(_))
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Faces(breakdown) => fmt::Display::fmt(breakdown, f),
            Summary::Label(label) => {
                write!(f, "object:{} score:{}", label.description, label.score)
            }
            Summary::Nothing => f.write_str(NOTHING_DETECTED),
            Summary::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}
