//! Asynchronous transport for the `vision` pipeline.
//!
//! The `client` crate defines an [`Annotator`] trait and the
//! [`VisionClient`] implementation that talks to Cloud Vision over HTTPS.

pub mod client;
pub mod config;
pub mod traits;

pub use client::VisionClient;
pub use config::{ClientConfig, ClientIdentity, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use traits::{Annotator, ClientError};
