use std::time::Duration;
use thiserror::Error;

/// Failure classes an image-generation transport can report.
///
/// Each provider implementation maps its own failures onto these variants;
/// [`crate::errors::ErrorMapper`] turns them into the crate's error codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after: Option<Duration>,
    },

    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        error_type: Option<String>,
        error_code: Option<String>,
    },

    #[error("Connection failed: {message}")]
    Connection { message: String },

    #[error("Request timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("Unexpected provider failure: {message}")]
    Unexpected { message: String },
}

impl ProviderError {
    pub fn authentication(message: impl Into<String>) -> Self {
        ProviderError::Authentication {
            message: message.into(),
        }
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        ProviderError::RateLimit {
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ProviderError::Api {
            status,
            message: message.into(),
            error_type: None,
            error_code: None,
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        ProviderError::Unexpected {
            message: message.into(),
        }
    }

    /// True for the generic API failure class: HTTP errors plus connection
    /// problems and timeouts on the way to the provider.
    pub fn is_api_failure(&self) -> bool {
        matches!(
            self,
            ProviderError::Api { .. } | ProviderError::Connection { .. } | ProviderError::Timeout { .. }
        )
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ProviderError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout {
                timeout: Duration::from_secs(60),
            }
        } else if err.is_connect() || err.is_request() {
            ProviderError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            ProviderError::Unexpected {
                message: format!("Failed to decode provider response: {}", err),
            }
        } else {
            ProviderError::Unexpected {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Unexpected {
            message: format!("Failed to deserialize provider response: {}", err),
        }
    }
}
