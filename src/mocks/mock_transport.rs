//! Mock transport and downloader for testing

use crate::errors::{ImageError, ProviderError};
use crate::services::images::ImagePayload;
use crate::transport::{ImageDownloader, ImageTransport, ProviderImageResponse};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock image transport that replays queued outcomes and records payloads
#[derive(Clone, Default)]
pub struct MockImageTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Default)]
struct MockTransportInner {
    responses: VecDeque<Result<ProviderImageResponse, ProviderError>>,
    payloads: Vec<ImagePayload>,
}

impl MockImageTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn push_response(&self, response: ProviderImageResponse) {
        self.inner.lock().unwrap().responses.push_back(Ok(response));
    }

    /// Queue a provider failure
    pub fn push_error(&self, error: ProviderError) {
        self.inner.lock().unwrap().responses.push_back(Err(error));
    }

    pub fn with_response(self, response: ProviderImageResponse) -> Self {
        self.push_response(response);
        self
    }

    pub fn with_error(self, error: ProviderError) -> Self {
        self.push_error(error);
        self
    }

    pub fn last_payload(&self) -> Option<ImagePayload> {
        self.inner.lock().unwrap().payloads.last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().payloads.len()
    }
}

#[async_trait]
impl ImageTransport for MockImageTransport {
    async fn generate(&self, payload: &ImagePayload) -> Result<ProviderImageResponse, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.payloads.push(payload.clone());
        inner
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::unexpected("No mock response configured")))
    }
}

/// Mock downloader keyed on call order, recording requested URLs
#[derive(Clone, Default)]
pub struct MockImageDownloader {
    inner: Arc<Mutex<MockDownloaderInner>>,
}

#[derive(Default)]
struct MockDownloaderInner {
    responses: VecDeque<Result<Bytes, ImageError>>,
    urls: Vec<String>,
}

impl MockImageDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(self, data: impl Into<Bytes>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .responses
            .push_back(Ok(data.into()));
        self
    }

    pub fn with_error(self, error: ImageError) -> Self {
        self.inner.lock().unwrap().responses.push_back(Err(error));
        self
    }

    pub fn urls(&self) -> Vec<String> {
        self.inner.lock().unwrap().urls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().urls.len()
    }
}

#[async_trait]
impl ImageDownloader for MockImageDownloader {
    async fn download(&self, url: &str) -> Result<Bytes, ImageError> {
        let mut inner = self.inner.lock().unwrap();
        inner.urls.push(url.to_string());
        inner
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(ImageError::download("No mock download configured")))
    }
}
