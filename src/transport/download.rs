use crate::client::ImageGenConfig;
use crate::errors::{ImageError, ImageGenError, ImageGenResult};
use crate::transport::ImageDownloader;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Fetches generated images with a plain unauthenticated GET.
#[derive(Debug, Clone)]
pub struct HttpImageDownloader {
    client: Client,
    timeout: Duration,
}

impl HttpImageDownloader {
    pub fn new(config: &ImageGenConfig) -> ImageGenResult<Self> {
        Self::with_timeout(config.download_timeout)
    }

    pub fn with_timeout(timeout: Duration) -> ImageGenResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ImageGenError::configuration(format!("Failed to build download client: {}", e))
        })?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn failure(url: &str, error: impl ToString) -> ImageError {
        let error = error.to_string();
        ImageError::download(format!("Failed to download image: {}", error))
            .with_detail("url", url)
            .with_detail("error", error)
    }
}

#[async_trait]
impl ImageDownloader for HttpImageDownloader {
    #[instrument(skip(self))]
    async fn download(&self, url: &str) -> Result<Bytes, ImageError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "image download failed");
            Self::failure(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "image download returned an error status");
            return Err(Self::failure(url, format!("HTTP {}", status)));
        }

        let body = response.bytes().await.map_err(|e| Self::failure(url, e))?;
        debug!(bytes = body.len(), "downloaded image");
        Ok(body)
    }
}
