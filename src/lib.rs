//! Image generation on top of the OpenAI images API.
//!
//! The crate validates a prompt, sends one generation request, turns the
//! provider response into an [`ImageResult`] and can download the image to
//! disk.
//!
//! ```rust,no_run
//! use integrations_imagegen::prelude::*;
//!
//! # async fn run() -> ImageGenResult<()> {
//! let service = ImageGenerationClientBuilder::new()
//!     .from_env()?
//!     .build_service()?;
//!
//! let options = ImageGenerationService::create_options_for_quality("high")?;
//! let result = service
//!     .generate_image("A lighthouse at dusk", Some(options), &SaveOptions::default())
//!     .await?;
//! println!("{}", format_for_display(&result));
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;

#[cfg(test)]
pub mod mocks;

pub use client::{ImageGenConfig, ImageGenerationClient, ImageGenerationClientBuilder};
pub use errors::{ErrorCode, ImageError, ImageGenError, ImageGenResult, ProviderError};

pub use services::images::{
    format_for_display, ImageGenerationService, ImageMetadata, ImageModel, ImageOptions,
    ImageQuality, ImageResult, ImageSize, ImageStyle, QualityTier, ResponseFormat, SaveOptions,
};

pub mod prelude {
    pub use crate::client::{ImageGenConfig, ImageGenerationClient, ImageGenerationClientBuilder};
    pub use crate::errors::{ErrorCode, ImageError, ImageGenError, ImageGenResult};
    pub use crate::services::images::{
        format_for_display, ImageGenerationService, ImageModel, ImageOptions, ImageQuality,
        ImageResult, ImageSize, ImageStyle, ResponseFormat, SaveOptions,
    };
}
