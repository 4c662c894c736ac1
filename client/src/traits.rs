use async_trait::async_trait;
use image::DynamicImage;
use std::time::Duration;
use thiserror::Error;
use vision::{ApiError, Summary, VisionError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("vision endpoint returned HTTP {status}{}", describe(.api))]
    Status { status: u16, api: Option<ApiError> },
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request cancelled")]
    Cancelled,
    #[error("a request is already in flight")]
    Busy,
    #[error("image preparation task failed: {0}")]
    Worker(String),
    #[error(transparent)]
    Vision(#[from] VisionError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

fn describe(api: &Option<ApiError>) -> String {
    api.as_ref().map(|e| format!(" ({e})")).unwrap_or_default()
}

/// Something that can turn an image into a [`Summary`].
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn annotate(&self, image: DynamicImage) -> Result<Summary, ClientError>;
}
