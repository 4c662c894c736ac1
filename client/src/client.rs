//! HTTP client for the Cloud Vision `images:annotate` endpoint.
//!
//! [`VisionClient`] prepares the image on a blocking worker, posts one
//! request and interprets the body. Only one request may be outstanding per
//! client; overlapping calls fail with [`ClientError::Busy`].

use crate::config::ClientConfig;
use crate::traits::{Annotator, ClientError};
use async_trait::async_trait;
use image::DynamicImage;
use reqwest::{Client, Url};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};
use vision::{AnnotateRequest, Summary};

pub struct VisionClient {
    config: ClientConfig,
    endpoint: Url,
    http: Client,
    in_flight: AtomicBool,
}

impl VisionClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ClientError::Config(format!("bad endpoint {}: {e}", config.endpoint)))?;
        let http = Client::builder().build()?;
        Ok(Self {
            config,
            endpoint,
            http,
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a request is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Annotate `image`, abandoning the request if `cancel` completes first.
    pub async fn annotate_until<F>(&self, image: DynamicImage, cancel: F) -> Result<Summary, ClientError>
    where
        F: Future<Output = ()> + Send,
    {
        let _guard = self.begin()?;
        tokio::select! {
            res = self.exchange(image) => res,
            _ = cancel => {
                info!("annotate request cancelled");
                Err(ClientError::Cancelled)
            }
        }
    }

    fn begin(&self) -> Result<InFlight<'_>, ClientError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ClientError::Busy)?;
        Ok(InFlight(&self.in_flight))
    }

    async fn exchange(&self, image: DynamicImage) -> Result<Summary, ClientError> {
        let opts = self.config.prepare;
        let payload = tokio::task::spawn_blocking(move || vision::prepare_with(&image, &opts))
            .await
            .map_err(|e| ClientError::Worker(e.to_string()))??;
        debug!(
            width = payload.width,
            height = payload.height,
            png_len = payload.png_len,
            downscaled = payload.downscaled,
            "image prepared"
        );
        let request = AnnotateRequest::with_features(payload.base64, self.config.features.clone());

        let start = Instant::now();
        let body = tokio::time::timeout(self.config.timeout, self.post(&request))
            .await
            .map_err(|_| ClientError::Timeout(self.config.timeout))??;
        info!(elapsed = ?start.elapsed(), bytes = body.len(), "annotate response received");
        Ok(vision::interpret(&body)?)
    }

    async fn post(&self, request: &AnnotateRequest) -> Result<Vec<u8>, ClientError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.config.api_key);

        let mut req = self.http.post(url).json(request);
        if let Some(identity) = &self.config.identity {
            for (name, value) in identity.headers() {
                req = req.header(name, value);
            }
        }
        info!(endpoint = %self.endpoint, "posting annotate request");
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            let api = match vision::interpret(&body) {
                Ok(Summary::Error(api)) => Some(api),
                _ => None,
            };
            warn!(%status, ?api, "annotate request rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                api,
            });
        }
        Ok(body.to_vec())
    }
}

/// Clears the in-flight flag when the request finishes or is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl Annotator for VisionClient {
    async fn annotate(&self, image: DynamicImage) -> Result<Summary, ClientError> {
        self.annotate_until(image, std::future::pending()).await
    }
}
