use crate::errors::{ImageGenError, ImageGenResult};
use crate::services::images::ImageOptions;

/// Maximum prompt length accepted by the provider, in characters.
pub const MAX_PROMPT_LENGTH: usize = 4000;

/// Placeholder content filter applied before any request leaves the process.
/// It is not a moderation system.
pub const PROMPT_DENYLIST: &[&str] = &["violence", "gore", "explicit"];

pub struct ImageRequestValidator;

impl ImageRequestValidator {
    /// Shape check shared by the client and the service: non-blank and
    /// within the length limit.
    pub fn validate_prompt_shape(prompt: &str) -> ImageGenResult<()> {
        if prompt.trim().is_empty() {
            return Err(ImageGenError::invalid_argument("Prompt cannot be empty"));
        }

        let length = prompt.chars().count();
        if length > MAX_PROMPT_LENGTH {
            return Err(ImageGenError::invalid_argument(format!(
                "Prompt too long (max {} characters, got {})",
                MAX_PROMPT_LENGTH, length
            )));
        }

        Ok(())
    }

    /// Returns the first denylisted term found in the prompt, ignoring case.
    pub fn denylisted_term(prompt: &str) -> Option<&'static str> {
        let lowered = prompt.to_lowercase();
        PROMPT_DENYLIST
            .iter()
            .copied()
            .find(|term| lowered.contains(term))
    }

    /// Business rule used by the service: shape check plus denylist.
    pub fn is_acceptable_prompt(prompt: &str) -> bool {
        Self::validate_prompt_shape(prompt).is_ok() && Self::denylisted_term(prompt).is_none()
    }

    pub fn validate_options(options: &ImageOptions) -> ImageGenResult<()> {
        if !options.model.valid_sizes().contains(&options.size) {
            let valid: Vec<&str> = options
                .model
                .valid_sizes()
                .iter()
                .map(|size| size.as_str())
                .collect();
            return Err(ImageGenError::invalid_argument(format!(
                "Invalid size '{}' for {}. Valid sizes: {}",
                options.size,
                options.model,
                valid.join(", ")
            )));
        }

        let max = options.model.max_images();
        if options.n == 0 || options.n > max {
            return Err(ImageGenError::invalid_argument(format!(
                "n must be between 1 and {} for {}, got {}",
                max, options.model, options.n
            )));
        }

        Ok(())
    }
}
