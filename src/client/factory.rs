use crate::client::{ImageGenConfig, ImageGenerationClient};
use crate::errors::{ImageGenError, ImageGenResult};
use crate::services::images::ImageGenerationService;
use crate::transport::{HttpImageDownloader, ImageDownloader, ImageTransport, ReqwestImageTransport};
use std::sync::Arc;

/// Composition root for the client and the service.
///
/// Unset collaborators default to the reqwest-backed implementations.
pub struct ImageGenerationClientBuilder {
    config: Option<ImageGenConfig>,
    transport: Option<Arc<dyn ImageTransport>>,
    downloader: Option<Arc<dyn ImageDownloader>>,
}

impl ImageGenerationClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            transport: None,
            downloader: None,
        }
    }

    pub fn with_config(mut self, config: ImageGenConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config = Some(ImageGenConfig::new(api_key));
        self
    }

    /// Reads the configuration from the environment.
    pub fn from_env(mut self) -> ImageGenResult<Self> {
        self.config = Some(ImageGenConfig::from_env()?);
        Ok(self)
    }

    pub fn with_transport(mut self, transport: Arc<dyn ImageTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_downloader(mut self, downloader: Arc<dyn ImageDownloader>) -> Self {
        self.downloader = Some(downloader);
        self
    }

    fn take_config(&mut self) -> ImageGenResult<ImageGenConfig> {
        let config = self.config.take().ok_or_else(|| {
            ImageGenError::configuration("API key must be provided")
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn build(mut self) -> ImageGenResult<ImageGenerationClient> {
        let config = self.take_config()?;
        let transport = match self.transport.take() {
            Some(transport) => transport,
            None => Arc::new(ReqwestImageTransport::new(&config)?),
        };

        Ok(ImageGenerationClient::with_transport(config, transport))
    }

    pub fn build_service(mut self) -> ImageGenResult<ImageGenerationService> {
        let downloader = match self.downloader.take() {
            Some(downloader) => downloader,
            None => {
                let config = self.config.as_ref().ok_or_else(|| {
                    ImageGenError::configuration("API key must be provided")
                })?;
                Arc::new(HttpImageDownloader::new(config)?)
            }
        };
        let client = self.build()?;

        Ok(ImageGenerationService::with_components(client, downloader))
    }
}

impl Default for ImageGenerationClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
