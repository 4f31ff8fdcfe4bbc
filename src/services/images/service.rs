use crate::client::{ImageGenConfig, ImageGenerationClient};
use crate::errors::{ImageError, ImageGenError, ImageGenResult};
use crate::services::images::{
    safe_filename, save_image, ImageOptions, ImageRequestValidator, ImageResult, QualityTier,
    ResponseParser,
};
use crate::transport::{HttpImageDownloader, ImageDownloader};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_SAVE_DIR: &str = "generated_images";

/// Whether and where `generate_image` stores the image it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    pub auto_save: bool,
    pub save_dir: PathBuf,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            auto_save: true,
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
        }
    }
}

impl SaveOptions {
    pub fn disabled() -> Self {
        Self {
            auto_save: false,
            ..Self::default()
        }
    }

    pub fn in_dir(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            auto_save: true,
            save_dir: save_dir.into(),
        }
    }
}

/// Validate, request, parse and optionally persist one generated image.
pub struct ImageGenerationService {
    client: ImageGenerationClient,
    parser: ResponseParser,
    downloader: Arc<dyn ImageDownloader>,
}

impl ImageGenerationService {
    /// Creates a service for an explicit API key.
    pub fn new(api_key: &str) -> ImageGenResult<Self> {
        if api_key.trim().is_empty() {
            return Err(ImageGenError::invalid_argument("API key is required"));
        }
        Self::from_config(ImageGenConfig::new(api_key))
    }

    pub fn from_config(config: ImageGenConfig) -> ImageGenResult<Self> {
        let downloader = Arc::new(HttpImageDownloader::new(&config)?);
        let client = ImageGenerationClient::from_config(config)?;
        Ok(Self::with_components(client, downloader))
    }

    pub fn with_components(
        client: ImageGenerationClient,
        downloader: Arc<dyn ImageDownloader>,
    ) -> Self {
        Self {
            client,
            parser: ResponseParser::new(),
            downloader,
        }
    }

    pub fn client(&self) -> &ImageGenerationClient {
        &self.client
    }

    /// Non-blank, at most 4000 characters and free of denylisted terms.
    pub fn validate_prompt(&self, prompt: &str) -> bool {
        ImageRequestValidator::is_acceptable_prompt(prompt)
    }

    #[instrument(skip(self, prompt, options), fields(auto_save = save.auto_save))]
    pub async fn generate_image(
        &self,
        prompt: &str,
        options: Option<ImageOptions>,
        save: &SaveOptions,
    ) -> ImageGenResult<ImageResult> {
        if !self.validate_prompt(prompt) {
            return Err(ImageGenError::invalid_argument(
                "Invalid prompt. Please check length and content.",
            ));
        }

        let options = options.unwrap_or_default();
        let raw = self
            .client
            .generate_image(prompt, Some(options.clone()))
            .await
            .map_err(structured)?;

        let result = self.parser.parse(&raw, prompt, &options)?;
        info!(generation_id = %result.generation_id, "image generated");

        if !save.auto_save || result.image_url.is_none() {
            return Ok(result);
        }

        let filename = safe_filename(prompt, &result.generation_id, &Local::now());
        let save_path = save.save_dir.join(filename);
        self.download_and_save_image(&result, &save_path).await
    }

    /// Generates without auto-save, then stores the image at `save_path`.
    pub async fn generate_and_save(
        &self,
        prompt: &str,
        save_path: impl AsRef<Path>,
        options: Option<ImageOptions>,
    ) -> ImageGenResult<ImageResult> {
        let result = self
            .generate_image(prompt, options, &SaveOptions::disabled())
            .await?;
        self.download_and_save_image(&result, save_path.as_ref()).await
    }

    /// Downloads the image behind `result.image_url` and writes it to
    /// `save_path`, returning an updated copy of `result`.
    #[instrument(skip(self, result), fields(generation_id = %result.generation_id, save_path = %save_path.display()))]
    pub async fn download_and_save_image(
        &self,
        result: &ImageResult,
        save_path: &Path,
    ) -> ImageGenResult<ImageResult> {
        let url = result.image_url.as_deref().ok_or_else(|| {
            ImageError::download("No image URL available for download")
                .with_detail("generation_id", result.generation_id.clone())
        })?;

        debug!(%url, "downloading image");
        let data = self.downloader.download(url).await.map_err(|e| {
            warn!(error = %e, "image download failed");
            e
        })?;

        save_image(save_path, &data).await?;
        info!(bytes = data.len(), "image saved");

        Ok(result.with_saved_image(data, save_path))
    }

    /// Options for a named tier: `standard`, `high` or `fast`.
    pub fn create_options_for_quality(level: &str) -> ImageGenResult<ImageOptions> {
        let tier: QualityTier = level.parse()?;
        Ok(ImageOptions::for_tier(tier))
    }
}

/// Structured failures pass through unchanged; anything else becomes
/// `GENERATION_FAILED` carrying the original text.
fn structured(err: ImageGenError) -> ImageGenError {
    match err {
        ImageGenError::Image(_) | ImageGenError::InvalidArgument { .. } => err,
        other => ImageError::generation_failed(other).into(),
    }
}
