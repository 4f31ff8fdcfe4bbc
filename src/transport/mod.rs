mod download;
mod http_transport;

pub use download::HttpImageDownloader;
pub use http_transport::ReqwestImageTransport;

use crate::errors::{ImageError, ProviderError};
use crate::services::images::{ImagePayload, RawImageEntry};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

/// Wire shape of a provider generation response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProviderImageResponse {
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub data: Vec<RawImageEntry>,
}

/// Capability to run one image generation against a provider.
///
/// Implementations make exactly one attempt per call and report failures
/// through the [`ProviderError`] classes.
#[async_trait]
pub trait ImageTransport: Send + Sync {
    async fn generate(&self, payload: &ImagePayload) -> Result<ProviderImageResponse, ProviderError>;
}

/// Capability to fetch the bytes behind a generated image URL.
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    /// Single GET; any failure is a `DOWNLOAD_ERROR`.
    async fn download(&self, url: &str) -> Result<Bytes, ImageError>;
}
