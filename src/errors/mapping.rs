use crate::errors::{ErrorCode, ImageError, ProviderError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Markers that identify a provider rejection on content grounds.
///
/// Matched case-insensitively against free-text error messages, so a change
/// in the provider's wording silently turns these into plain `API_ERROR`s.
pub const CONTENT_POLICY_MARKERS: &[&str] = &["content policy", "safety"];

#[derive(Debug, Deserialize, Serialize)]
pub struct ProviderErrorResponse {
    pub error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProviderErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
    pub param: Option<String>,
}

pub struct ErrorMapper;

impl ErrorMapper {
    /// Maps an HTTP status code and optional error body to a `ProviderError`
    pub fn map_status_code(
        status_code: u16,
        error_response: Option<ProviderErrorResponse>,
    ) -> ProviderError {
        let error_detail = error_response.map(|r| r.error);
        let message = error_detail
            .as_ref()
            .map(|d| d.message.clone())
            .unwrap_or_else(|| format!("HTTP error: {}", status_code));
        let error_type = error_detail.as_ref().and_then(|d| d.error_type.clone());
        let error_code = error_detail.as_ref().and_then(|d| d.code.clone());

        match status_code {
            401 | 403 => ProviderError::Authentication { message },
            429 => ProviderError::RateLimit {
                message,
                retry_after: None,
            },
            _ => ProviderError::Api {
                status: status_code,
                message,
                error_type,
                error_code,
            },
        }
    }

    /// Maps status, headers and raw body, picking up `retry-after` on 429s
    pub fn from_response(status_code: u16, headers: &http::HeaderMap, body: &[u8]) -> ProviderError {
        let error_response = Self::parse_error_response(body);
        let error = Self::map_status_code(status_code, error_response);

        match error {
            ProviderError::RateLimit { message, .. } => ProviderError::RateLimit {
                message,
                retry_after: Self::extract_retry_after(headers),
            },
            other => other,
        }
    }

    /// Extracts retry-after header value in seconds
    pub fn extract_retry_after(headers: &http::HeaderMap) -> Option<Duration> {
        headers
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    pub fn parse_error_response(body: &[u8]) -> Option<ProviderErrorResponse> {
        serde_json::from_slice(body).ok()
    }

    /// True when the message carries one of the content-policy markers.
    pub fn mentions_content_policy(message: &str) -> bool {
        let lowered = message.to_lowercase();
        CONTENT_POLICY_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
    }

    /// Translates a transport failure into the closed error taxonomy.
    ///
    /// Priority: authentication, rate limit, content policy (API failures
    /// only), other API failures, everything else.
    pub fn to_image_error(error: &ProviderError) -> ImageError {
        let original = error.to_string();

        let mapped = match error {
            ProviderError::Authentication { .. } => ImageError::new(
                ErrorCode::AuthenticationError,
                "Invalid API key or authentication failed",
            ),
            ProviderError::RateLimit { retry_after, .. } => {
                let mapped =
                    ImageError::new(ErrorCode::RateLimitError, "API rate limit exceeded");
                match retry_after {
                    Some(delay) => mapped.with_detail("retry_after_secs", delay.as_secs().to_string()),
                    None => mapped,
                }
            }
            err if err.is_api_failure() && Self::mentions_content_policy(&original) => {
                ImageError::new(
                    ErrorCode::ContentPolicyError,
                    "Prompt violates the provider's content policy",
                )
            }
            err if err.is_api_failure() => ImageError::new(
                ErrorCode::ApiError,
                format!("API request failed: {}", original),
            ),
            _ => ImageError::new(
                ErrorCode::UnknownError,
                format!("Unexpected error: {}", original),
            ),
        };

        mapped.with_detail("original_error", original)
    }
}

impl From<ProviderError> for ImageError {
    fn from(err: ProviderError) -> Self {
        ErrorMapper::to_image_error(&err)
    }
}
