mod api_key;

pub use api_key::{ApiKeyProvider, API_KEY_MIN_LENGTH, API_KEY_PREFIX};

use crate::errors::ProviderError;
use http::HeaderMap;

/// Trait for authentication providers
pub trait AuthProvider: Send + Sync {
    /// Authenticates the request by adding appropriate headers
    fn authenticate(&self, headers: &mut HeaderMap) -> Result<(), ProviderError>;

    /// Checks if the credentials look well-formed
    fn is_valid(&self) -> bool;
}
