use crate::services::images::{ImageModel, ImageQuality, ImageSize, ImageStyle};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};

/// What was asked for and what the provider reported back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
    pub prompt: String,
    pub revised_prompt: Option<String>,
    pub model: ImageModel,
    pub size: ImageSize,
    pub quality: Option<ImageQuality>,
    pub style: Option<ImageStyle>,
    pub created_at: DateTime<Utc>,
}

impl ImageMetadata {
    pub fn is_high_resolution(&self) -> bool {
        let (width, height) = self.size.dimensions();
        width >= 1024 && height >= 1024
    }

    /// Reduced width:height ratio, e.g. `7:4` for 1792x1024.
    pub fn aspect_ratio(&self) -> String {
        let (width, height) = self.size.dimensions();
        let divisor = gcd(width, height);
        format!("{}:{}", width / divisor, height / divisor)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl fmt::Display for ImageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: String = self.prompt.chars().take(50).collect();
        write!(f, "{} {} - {}...", self.model, self.size, head)
    }
}

/// A successful generation, before and after the optional download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResult {
    pub generation_id: String,
    pub prompt: String,
    pub image_url: Option<String>,
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
    pub metadata: ImageMetadata,
    pub file_path: Option<PathBuf>,
    pub image_data: Option<Bytes>,
    pub created_at: DateTime<Utc>,
}

impl ImageResult {
    pub fn is_downloaded(&self) -> bool {
        self.image_data.is_some()
    }

    pub fn is_saved(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn file_size(&self) -> Option<usize> {
        self.image_data.as_ref().map(Bytes::len)
    }

    /// Bytes of the inline base64 payload, if the provider returned one.
    pub fn decoded_image(&self) -> Option<Bytes> {
        self.b64_json
            .as_deref()
            .and_then(|payload| STANDARD.decode(payload).ok())
            .map(Bytes::from)
    }

    /// Copy of this result carrying the downloaded bytes and where they were
    /// written. The original is left untouched.
    pub fn with_saved_image(&self, image_data: Bytes, file_path: impl AsRef<Path>) -> Self {
        Self {
            image_data: Some(image_data),
            file_path: Some(file_path.as_ref().to_path_buf()),
            ..self.clone()
        }
    }
}

impl fmt::Display for ImageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: String = self.prompt.chars().take(30).collect();
        let mut status = Vec::new();
        if self.is_downloaded() {
            status.push("downloaded");
        }
        if self.is_saved() {
            status.push("saved");
        }

        write!(f, "ImageResult(prompt='{}...'", head)?;
        if !status.is_empty() {
            write!(f, " ({})", status.join(", "))?;
        }
        write!(f, ")")
    }
}
