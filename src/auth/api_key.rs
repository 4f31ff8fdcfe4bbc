use crate::auth::AuthProvider;
use crate::errors::ProviderError;
use http::header::{HeaderValue, AUTHORIZATION};
use http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

/// Every provider secret key starts with this literal.
pub const API_KEY_PREFIX: &str = "sk-";

/// Keys must be strictly longer than this many characters.
pub const API_KEY_MIN_LENGTH: usize = 20;

/// Bearer-token authentication with a provider API key
pub struct ApiKeyProvider {
    api_key: SecretString,
}

impl ApiKeyProvider {
    /// Creates a new ApiKeyProvider with a secret string
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// Syntactic check only: a well-formed key may still be revoked or expired.
    pub fn validate_key_format(key: &str) -> bool {
        key.starts_with(API_KEY_PREFIX) && key.chars().count() > API_KEY_MIN_LENGTH
    }
}

impl AuthProvider for ApiKeyProvider {
    fn authenticate(&self, headers: &mut HeaderMap) -> Result<(), ProviderError> {
        let api_key = self.api_key.expose_secret();

        let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
            ProviderError::authentication("API key contains characters not allowed in a header")
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        Ok(())
    }

    fn is_valid(&self) -> bool {
        Self::validate_key_format(self.api_key.expose_secret())
    }
}

impl std::fmt::Debug for ApiKeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyProvider")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
