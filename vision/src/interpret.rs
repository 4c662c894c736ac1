//! Reduce an `images:annotate` response body to a [`Summary`].

use crate::emotion::{Emotion, EmotionBreakdown, EmotionTotals};
use crate::error::{Result, VisionError};
use crate::likelihood::Likelihood;
use crate::summary::{ApiError, LabelSummary, Summary};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Labels at or below this score are not reported.
pub const LABEL_SCORE_THRESHOLD: f64 = 0.65;

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    error: Option<Map<String, Value>>,
    #[serde(default)]
    responses: Option<Vec<ImageResponse>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    error: Option<Map<String, Value>>,
    #[serde(default)]
    face_annotations: Option<Vec<FaceAnnotation>>,
    #[serde(default)]
    label_annotations: Option<Vec<Option<LabelAnnotation>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FaceAnnotation {
    #[serde(default)]
    joy_likelihood: Option<String>,
    #[serde(default)]
    sorrow_likelihood: Option<String>,
    #[serde(default)]
    surprise_likelihood: Option<String>,
    #[serde(default)]
    anger_likelihood: Option<String>,
}

impl FaceAnnotation {
    fn category(&self, emotion: Emotion) -> Option<&str> {
        match emotion {
            Emotion::Joy => self.joy_likelihood.as_deref(),
            Emotion::Sorrow => self.sorrow_likelihood.as_deref(),
            Emotion::Surprise => self.surprise_likelihood.as_deref(),
            Emotion::Anger => self.anger_likelihood.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LabelAnnotation {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

/// Interpret a raw response body.
///
/// The first matching rule wins: an API error, then faces, then a label
/// scoring above [`LABEL_SCORE_THRESHOLD`], then [`Summary::Nothing`].
/// An empty `faceAnnotations` array does not count as faces.
pub fn interpret(raw: &[u8]) -> Result<Summary> {
    let document = parse(raw)?;
    if let Some(err) = document.error.as_ref().and_then(api_error) {
        debug!(code = ?err.code, "response carries an api error");
        return Ok(Summary::Error(err));
    }
    let responses = document
        .responses
        .ok_or_else(|| VisionError::Parse("missing `responses` array".into()))?;
    let Some(first) = responses.into_iter().next() else {
        debug!("response has no image results");
        return Ok(Summary::Nothing);
    };
    if let Some(err) = first.error.as_ref().and_then(api_error) {
        debug!(code = ?err.code, "image result carries an api error");
        return Ok(Summary::Error(err));
    }

    match first.face_annotations.as_deref() {
        Some([]) => debug!("face list is empty, checking labels"),
        Some(faces) => return summarize_faces(faces).map(Summary::Faces),
        None => {}
    }

    let top = first.label_annotations.into_iter().flatten().next().flatten();
    if let Some(label) = top {
        let score = label.score.unwrap_or_default();
        if score > LABEL_SCORE_THRESHOLD {
            return Ok(Summary::Label(LabelSummary {
                description: label.description.unwrap_or_default(),
                score,
            }));
        }
        debug!(score, "top label below threshold");
    }
    Ok(Summary::Nothing)
}

fn parse(raw: &[u8]) -> Result<AnnotateResponse> {
    let value: Value =
        serde_json::from_slice(raw).map_err(|e| VisionError::Parse(e.to_string()))?;
    if !value.is_object() {
        return Err(VisionError::Parse("expected a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| VisionError::Parse(e.to_string()))
}

fn api_error(obj: &Map<String, Value>) -> Option<ApiError> {
    if obj.is_empty() {
        return None;
    }
    Some(ApiError {
        code: obj.get("code").and_then(Value::as_i64),
        message: obj.get("message").and_then(Value::as_str).map(str::to_owned),
        status: obj.get("status").and_then(Value::as_str).map(str::to_owned),
    })
}

fn summarize_faces(faces: &[FaceAnnotation]) -> Result<EmotionBreakdown> {
    let mut totals = EmotionTotals::default();
    for (index, face) in faces.iter().enumerate() {
        for emotion in Emotion::ALL {
            let category = face.category(emotion);
            let likelihood = category.and_then(Likelihood::from_category).ok_or_else(|| {
                VisionError::DataIntegrity {
                    face: index,
                    field: emotion.field(),
                    value: category.map(str::to_owned),
                }
            })?;
            totals.add(emotion, likelihood.weight());
        }
    }
    debug!(faces = faces.len(), "averaged face emotions");
    Ok(totals.breakdown(faces.len()))
}
