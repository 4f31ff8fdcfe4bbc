mod client_impl;
mod config;
mod factory;

pub use client_impl::ImageGenerationClient;
pub use config::{
    ImageGenConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_DOWNLOAD_TIMEOUT,
    DEFAULT_TIMEOUT, TIMEOUT_ENV,
};
pub use factory::ImageGenerationClientBuilder;
