//! JSON body for `images:annotate`.

use crate::error::Result;
use crate::prepare::EncodedPayload;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RESULTS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    FaceDetection,
    LabelDetection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    #[serde(rename = "maxResults")]
    pub max_results: u32,
}

impl Feature {
    pub fn new(kind: FeatureType, max_results: u32) -> Self {
        Self { kind, max_results }
    }

    /// Face and label detection, ten results each.
    pub fn defaults() -> Vec<Feature> {
        vec![
            Feature::new(FeatureType::FaceDetection, DEFAULT_MAX_RESULTS),
            Feature::new(FeatureType::LabelDetection, DEFAULT_MAX_RESULTS),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub image: ImageContent,
    pub features: Vec<Feature>,
}

/// Request body holding a single image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotateRequest {
    pub requests: Vec<ImageRequest>,
}

impl AnnotateRequest {
    /// Request the default features for base64 `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_features(content, Feature::defaults())
    }

    pub fn with_features(content: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: content.into(),
                },
                features,
            }],
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl From<EncodedPayload> for AnnotateRequest {
    fn from(payload: EncodedPayload) -> Self {
        Self::new(payload.base64)
    }
}
