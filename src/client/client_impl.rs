use crate::auth::ApiKeyProvider;
use crate::client::ImageGenConfig;
use crate::errors::{ErrorMapper, ImageGenResult};
use crate::observability::redact_secrets;
use crate::services::images::{
    ImageOptions, ImagePayload, ImageRequestValidator, RawImageResponse,
};
use crate::transport::{ImageTransport, ReqwestImageTransport};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Transport client: builds the provider payload, makes one call and maps
/// failures into the crate's error taxonomy.
pub struct ImageGenerationClient {
    config: ImageGenConfig,
    transport: Arc<dyn ImageTransport>,
}

impl ImageGenerationClient {
    /// Creates a client from an explicit key, falling back to
    /// `OPENAI_API_KEY` when none is given.
    pub fn new(api_key: Option<String>) -> ImageGenResult<Self> {
        let config = ImageGenConfig::resolve(api_key)?;
        Self::from_config(config)
    }

    /// Creates a client that talks to the provider over HTTP.
    pub fn from_config(config: ImageGenConfig) -> ImageGenResult<Self> {
        config.validate()?;
        let transport = Arc::new(ReqwestImageTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client over any transport implementation.
    pub fn with_transport(config: ImageGenConfig, transport: Arc<dyn ImageTransport>) -> Self {
        let client = Self { config, transport };
        if !client.validate_api_key() {
            warn!(
                api_key = %client.config.api_key_hint(),
                "API key format looks invalid"
            );
        }
        client
    }

    /// Local syntactic check of the configured key.
    pub fn validate_api_key(&self) -> bool {
        ApiKeyProvider::validate_key_format(self.config.api_key())
    }

    pub fn config(&self) -> &ImageGenConfig {
        &self.config
    }

    /// Generates images for `prompt`, one provider call, no retry.
    ///
    /// Prompt shape and options are checked before anything goes out. The
    /// returned `created` is 0 when the provider omits it.
    #[instrument(skip(self, prompt, options), fields(prompt_len = prompt.chars().count()))]
    pub async fn generate_image(
        &self,
        prompt: &str,
        options: Option<ImageOptions>,
    ) -> ImageGenResult<RawImageResponse> {
        ImageRequestValidator::validate_prompt_shape(prompt)?;

        let options = options.unwrap_or_default();
        options.validate()?;

        let payload = ImagePayload::from_options(prompt, &options);
        info!(model = %payload.model, size = %payload.size, n = payload.n, "requesting image generation");

        let response = self.transport.generate(&payload).await.map_err(|e| {
            let mapped = ErrorMapper::to_image_error(&e);
            warn!(code = %mapped.code, error = %redact_secrets(&e.to_string()), "image generation failed");
            mapped
        })?;

        debug!(images = response.data.len(), "image generation succeeded");
        Ok(RawImageResponse {
            created: response.created.unwrap_or(0),
            data: response.data,
        })
    }
}

impl std::fmt::Debug for ImageGenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGenerationClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
