mod display;
mod filename;
mod parser;
mod result;
mod service;
mod storage;
mod types;
mod validation;


pub use display::format_for_display;
pub use filename::{prompt_stem, safe_filename, MAX_STEM_LENGTH, TIMESTAMP_FORMAT};
pub use parser::ResponseParser;
pub use result::{ImageMetadata, ImageResult};
pub use service::{ImageGenerationService, SaveOptions, DEFAULT_SAVE_DIR};
pub use storage::save_image;
pub use types::{
    ImageModel, ImageOptions, ImagePayload, ImageQuality, ImageSize, ImageStyle, QualityTier,
    RawImageEntry, RawImageResponse, ResponseFormat,
};
pub use validation::{ImageRequestValidator, MAX_PROMPT_LENGTH, PROMPT_DENYLIST};
