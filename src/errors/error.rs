use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub type ImageGenResult<T> = Result<T, ImageGenError>;

/// Closed set of failure codes carried by [`ImageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    AuthenticationError,
    RateLimitError,
    ContentPolicyError,
    ApiError,
    UnknownError,
    ParsingError,
    DownloadError,
    SaveError,
    GenerationFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AuthenticationError => "AUTHENTICATION_ERROR",
            ErrorCode::RateLimitError => "RATE_LIMIT_ERROR",
            ErrorCode::ContentPolicyError => "CONTENT_POLICY_ERROR",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::ParsingError => "PARSING_ERROR",
            ErrorCode::DownloadError => "DOWNLOAD_ERROR",
            ErrorCode::SaveError => "SAVE_ERROR",
            ErrorCode::GenerationFailed => "GENERATION_FAILED",
        }
    }

    /// Codes raised by the provider call itself, as opposed to local steps.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::AuthenticationError
                | ErrorCode::RateLimitError
                | ErrorCode::ContentPolicyError
                | ErrorCode::ApiError
                | ErrorCode::UnknownError
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure of an image operation.
///
/// `details` exists for diagnostics only; nothing in the crate branches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageError {
    pub code: ErrorCode,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl ImageError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParsingError, message)
    }

    pub fn download(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DownloadError, message)
    }

    pub fn save(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SaveError, message)
    }

    /// Wraps a failure that was not already structured.
    pub fn generation_failed(original: impl fmt::Display) -> Self {
        let original = original.to_string();
        Self::new(
            ErrorCode::GenerationFailed,
            format!("Image generation failed: {}", original),
        )
        .with_detail("original_error", original)
    }
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.details.is_empty() {
            write!(f, " | Details: {:?}", self.details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ImageError {}

#[derive(Error, Debug)]
pub enum ImageGenError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Image(#[from] ImageError),
}

impl ImageGenError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ImageGenError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ImageGenError::Configuration {
            message: message.into(),
        }
    }

    /// The structured error code, if this failure carries one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ImageGenError::Image(err) => Some(err.code),
            _ => None,
        }
    }

    pub fn as_image_error(&self) -> Option<&ImageError> {
        match self {
            ImageGenError::Image(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ImageGenError::InvalidArgument { .. })
    }
}
