use crate::errors::{ImageGenError, ImageGenResult};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the provider base URL.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "OPENAI_TIMEOUT";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Timeout of the generation request itself.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout of the plain GET that fetches a generated image.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ImageGenConfig {
    api_key: SecretString,
    pub base_url: Url,
    pub timeout: Duration,
    pub download_timeout: Duration,
    pub user_agent: String,
}

impl ImageGenConfig {
    /// Creates a new ImageGenConfig with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: default_base_url(),
            timeout: DEFAULT_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }

    /// Creates a new ImageGenConfig from environment variables
    ///
    /// Reads the following environment variables:
    /// - OPENAI_API_KEY (required)
    /// - OPENAI_BASE_URL (optional, defaults to https://api.openai.com/v1)
    /// - OPENAI_TIMEOUT (optional, seconds)
    pub fn from_env() -> ImageGenResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ImageGenError::configuration(format!(
                    "API key must be provided or set in {} environment variable",
                    API_KEY_ENV
                ))
            })?;

        Self::new(api_key).with_env_overrides()
    }

    /// Uses `api_key` when given, otherwise falls back to the environment.
    ///
    /// This is the only place credentials are read from the process
    /// environment.
    pub fn resolve(api_key: Option<String>) -> ImageGenResult<Self> {
        match api_key.filter(|key| !key.is_empty()) {
            Some(key) => Self::new(key).with_env_overrides(),
            None => Self::from_env(),
        }
    }

    fn with_env_overrides(mut self) -> ImageGenResult<Self> {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            self.base_url = Url::parse(&base_url).map_err(|e| {
                ImageGenError::configuration(format!("Invalid {}: {}", BASE_URL_ENV, e))
            })?;
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            if let Ok(secs) = timeout.parse::<u64>() {
                self.timeout = Duration::from_secs(secs);
            }
        }

        Ok(self)
    }

    /// Validates the configuration
    pub fn validate(&self) -> ImageGenResult<()> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ImageGenError::configuration("API key is empty"));
        }

        if self.timeout.is_zero() || self.download_timeout.is_zero() {
            return Err(ImageGenError::configuration(
                "Timeouts must be greater than 0",
            ));
        }

        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(ImageGenError::configuration(format!(
                "Base URL must be http(s), got '{}'",
                self.base_url
            )));
        }

        Ok(())
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Last 4 characters of the key, for logs.
    pub fn api_key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        let count = key.chars().count();
        if count > 4 {
            let tail: String = key.chars().skip(count - 4).collect();
            format!("...{}", tail)
        } else {
            "****".to_string()
        }
    }
}

impl std::fmt::Debug for ImageGenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGenConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("download_timeout", &self.download_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

fn default_user_agent() -> String {
    format!("integrations-imagegen/{}", env!("CARGO_PKG_VERSION"))
}
