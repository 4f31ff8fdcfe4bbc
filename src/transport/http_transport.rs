use crate::auth::{ApiKeyProvider, AuthProvider};
use crate::client::ImageGenConfig;
use crate::errors::{ErrorMapper, ImageGenError, ImageGenResult, ProviderError};
use crate::observability::redact_secrets;
use crate::services::images::ImagePayload;
use crate::transport::{ImageTransport, ProviderImageResponse};
use async_trait::async_trait;
use http::HeaderMap;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

const GENERATIONS_PATH: &str = "/images/generations";

/// Image generation over the provider's HTTP API using reqwest
pub struct ReqwestImageTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
    auth: Arc<dyn AuthProvider>,
}

impl ReqwestImageTransport {
    /// Creates a new ReqwestImageTransport from configuration
    pub fn new(config: &ImageGenConfig) -> ImageGenResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                ImageGenError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            auth: Arc::new(ApiKeyProvider::new(config.api_key())),
        })
    }

    /// Builds a full URL from a path
    fn build_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Timeouts report the configured request timeout.
    fn request_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                timeout: self.timeout,
            }
        } else {
            ProviderError::from(err)
        }
    }
}

#[async_trait]
impl ImageTransport for ReqwestImageTransport {
    #[instrument(skip(self, payload), fields(model = %payload.model, size = %payload.size, n = payload.n))]
    async fn generate(&self, payload: &ImagePayload) -> Result<ProviderImageResponse, ProviderError> {
        let url = self.build_url(GENERATIONS_PATH);

        let mut headers = HeaderMap::new();
        self.auth.authenticate(&mut headers)?;

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.request_error(e))?;

        if !status.is_success() {
            let error = ErrorMapper::from_response(status.as_u16(), &response_headers, &body);
            warn!(
                status = status.as_u16(),
                error = %redact_secrets(&error.to_string()),
                "image generation request failed"
            );
            return Err(error);
        }

        debug!(status = status.as_u16(), bytes = body.len(), "image generation request succeeded");
        Ok(serde_json::from_slice(&body)?)
    }
}
