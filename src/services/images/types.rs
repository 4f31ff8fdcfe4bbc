use crate::errors::{ImageGenError, ImageGenResult};
use crate::services::images::ImageRequestValidator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageModel {
    #[serde(rename = "dall-e-2")]
    DallE2,
    #[serde(rename = "dall-e-3")]
    DallE3,
}

impl ImageModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::DallE2 => "dall-e-2",
            ImageModel::DallE3 => "dall-e-3",
        }
    }

    /// Only DALL-E 3 accepts `quality` and `style`.
    pub fn supports_quality_and_style(&self) -> bool {
        matches!(self, ImageModel::DallE3)
    }

    pub fn valid_sizes(&self) -> &'static [ImageSize] {
        match self {
            ImageModel::DallE2 => &[ImageSize::Size256, ImageSize::Size512, ImageSize::Size1024],
            ImageModel::DallE3 => &[
                ImageSize::Size1024,
                ImageSize::Size1792x1024,
                ImageSize::Size1024x1792,
            ],
        }
    }

    /// Provider cap on images per request.
    pub fn max_images(&self) -> u32 {
        match self {
            ImageModel::DallE2 => 10,
            ImageModel::DallE3 => 1,
        }
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageModel {
    type Err = ImageGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dall-e-2" => Ok(ImageModel::DallE2),
            "dall-e-3" => Ok(ImageModel::DallE3),
            other => Err(ImageGenError::invalid_argument(format!(
                "Unsupported model '{}'. Use 'dall-e-2' or 'dall-e-3'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    Size256,
    #[serde(rename = "512x512")]
    Size512,
    #[serde(rename = "1024x1024")]
    Size1024,
    #[serde(rename = "1792x1024")]
    Size1792x1024,
    #[serde(rename = "1024x1792")]
    Size1024x1792,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Size256 => "256x256",
            ImageSize::Size512 => "512x512",
            ImageSize::Size1024 => "1024x1024",
            ImageSize::Size1792x1024 => "1792x1024",
            ImageSize::Size1024x1792 => "1024x1792",
        }
    }

    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ImageSize::Size256 => (256, 256),
            ImageSize::Size512 => (512, 512),
            ImageSize::Size1024 => (1024, 1024),
            ImageSize::Size1792x1024 => (1792, 1024),
            ImageSize::Size1024x1792 => (1024, 1792),
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = ImageGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "256x256" => Ok(ImageSize::Size256),
            "512x512" => Ok(ImageSize::Size512),
            "1024x1024" => Ok(ImageSize::Size1024),
            "1792x1024" => Ok(ImageSize::Size1792x1024),
            "1024x1792" => Ok(ImageSize::Size1024x1792),
            other => Err(ImageGenError::invalid_argument(format!(
                "Unsupported image size '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    Hd,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::Hd => "hd",
        }
    }
}

impl FromStr for ImageQuality {
    type Err = ImageGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(ImageQuality::Standard),
            "hd" => Ok(ImageQuality::Hd),
            other => Err(ImageGenError::invalid_argument(format!(
                "Unsupported quality '{}'. Use 'standard' or 'hd'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Vivid,
    Natural,
}

impl ImageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Vivid => "vivid",
            ImageStyle::Natural => "natural",
        }
    }
}

impl FromStr for ImageStyle {
    type Err = ImageGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vivid" => Ok(ImageStyle::Vivid),
            "natural" => Ok(ImageStyle::Natural),
            other => Err(ImageGenError::invalid_argument(format!(
                "Unsupported style '{}'. Use 'vivid' or 'natural'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    Url,
    B64Json,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Url => "url",
            ResponseFormat::B64Json => "b64_json",
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = ImageGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(ResponseFormat::Url),
            "b64_json" | "base64" => Ok(ResponseFormat::B64Json),
            other => Err(ImageGenError::invalid_argument(format!(
                "Unsupported response format '{}'. Use 'url' or 'b64_json'",
                other
            ))),
        }
    }
}

/// Parameters of one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub model: ImageModel,
    pub size: ImageSize,
    pub response_format: ResponseFormat,
    pub n: u32,
    pub quality: Option<ImageQuality>,
    pub style: Option<ImageStyle>,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            model: ImageModel::DallE3,
            size: ImageSize::Size1024,
            response_format: ResponseFormat::Url,
            n: 1,
            quality: Some(ImageQuality::Standard),
            style: Some(ImageStyle::Vivid),
        }
    }
}

impl ImageOptions {
    pub fn new(model: ImageModel, size: ImageSize) -> Self {
        Self {
            model,
            size,
            response_format: ResponseFormat::Url,
            n: 1,
            quality: None,
            style: None,
        }
    }

    /// Concrete options for a named quality tier.
    pub fn for_tier(tier: QualityTier) -> Self {
        match tier {
            QualityTier::Standard => Self::new(ImageModel::DallE3, ImageSize::Size1024)
                .with_quality(ImageQuality::Standard)
                .with_style(ImageStyle::Natural),
            QualityTier::High => Self::new(ImageModel::DallE3, ImageSize::Size1024)
                .with_quality(ImageQuality::Hd)
                .with_style(ImageStyle::Vivid),
            QualityTier::Fast => Self::new(ImageModel::DallE2, ImageSize::Size512),
        }
    }

    pub fn with_model(mut self, model: ImageModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_response_format(mut self, response_format: ResponseFormat) -> Self {
        self.response_format = response_format;
        self
    }

    pub fn with_n(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_style(mut self, style: ImageStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Size must suit the model and `n` must be within the model's cap.
    pub fn validate(&self) -> ImageGenResult<()> {
        ImageRequestValidator::validate_options(self)
    }

    /// Quality as sent to the provider, `None` for models that ignore it.
    pub fn effective_quality(&self) -> Option<ImageQuality> {
        self.quality
            .filter(|_| self.model.supports_quality_and_style())
    }

    /// Style as sent to the provider, `None` for models that ignore it.
    pub fn effective_style(&self) -> Option<ImageStyle> {
        self.style.filter(|_| self.model.supports_quality_and_style())
    }
}

/// Named presets accepted by `create_options_for_quality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    Standard,
    High,
    Fast,
}

impl FromStr for QualityTier {
    type Err = ImageGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(QualityTier::Standard),
            "high" => Ok(QualityTier::High),
            "fast" => Ok(QualityTier::Fast),
            other => Err(ImageGenError::invalid_argument(format!(
                "Unknown quality level: {}. Use 'standard', 'high', or 'fast'",
                other
            ))),
        }
    }
}

/// Request body for `POST /images/generations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePayload {
    pub model: ImageModel,
    pub prompt: String,
    pub size: ImageSize,
    pub response_format: ResponseFormat,
    pub n: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<ImageQuality>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ImageStyle>,
}

impl ImagePayload {
    pub fn from_options(prompt: impl Into<String>, options: &ImageOptions) -> Self {
        Self {
            model: options.model,
            prompt: prompt.into(),
            size: options.size,
            response_format: options.response_format,
            n: options.n,
            quality: options.effective_quality(),
            style: options.effective_style(),
        }
    }
}

/// Provider-neutral view of a generation response.
///
/// Entries only carry the fields the provider actually returned; absent
/// fields are left out when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawImageResponse {
    pub created: i64,
    pub data: Vec<RawImageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawImageEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

impl RawImageEntry {
    /// Names of the fields that are present, for diagnostics.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.url.is_some() {
            fields.push("url");
        }
        if self.b64_json.is_some() {
            fields.push("b64_json");
        }
        if self.revised_prompt.is_some() {
            fields.push("revised_prompt");
        }
        fields
    }
}
