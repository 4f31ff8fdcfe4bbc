use crate::errors::ImageError;
use crate::services::images::{ImageMetadata, ImageOptions, ImageResult, RawImageResponse};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;
use uuid::Uuid;

/// Turns a raw generation response into an [`ImageResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses the first image of `response`.
    ///
    /// Fails with `PARSING_ERROR` when the response holds no image, when the
    /// first entry has neither a url nor a base64 payload, or when the
    /// payload is not valid base64.
    pub fn parse(
        &self,
        response: &RawImageResponse,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<ImageResult, ImageError> {
        let image = response.data.first().ok_or_else(|| {
            ImageError::parsing("No images in response data")
                .with_detail("data_length", response.data.len().to_string())
        })?;

        if image.url.is_none() && image.b64_json.is_none() {
            return Err(
                ImageError::parsing("No image URL or base64 data in response")
                    .with_detail("image_data_keys", image.present_fields().join(",")),
            );
        }

        if let Some(payload) = &image.b64_json {
            STANDARD.decode(payload).map_err(|e| {
                ImageError::parsing("Failed to decode base64 image data")
                    .with_detail("error", e.to_string())
            })?;
        }

        let created_at = Self::parse_timestamp(response.created);
        let generation_id = Self::new_generation_id();
        debug!(%generation_id, images = response.data.len(), "parsed generation response");

        let metadata = ImageMetadata {
            prompt: prompt.to_string(),
            revised_prompt: image.revised_prompt.clone(),
            model: options.model,
            size: options.size,
            quality: options.effective_quality(),
            style: options.effective_style(),
            created_at,
        };

        Ok(ImageResult {
            generation_id,
            prompt: prompt.to_string(),
            image_url: image.url.clone(),
            b64_json: image.b64_json.clone(),
            revised_prompt: image.revised_prompt.clone(),
            metadata,
            file_path: None,
            image_data: None,
            created_at: Utc::now(),
        })
    }

    /// `gen-` followed by 8 hex characters.
    pub fn new_generation_id() -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("gen-{}", &hex[..8])
    }

    /// Provider `created` seconds to a timestamp; 0 or out of range means now.
    fn parse_timestamp(created: i64) -> DateTime<Utc> {
        if created <= 0 {
            return Utc::now();
        }
        Utc.timestamp_opt(created, 0).single().unwrap_or_else(Utc::now)
    }
}
