//! Image generation fixtures

use crate::transport::ProviderImageResponse;
use serde_json::json;

/// 1x1 transparent PNG.
pub const TINY_PNG_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

/// Sample image generation response with a URL and a revised prompt
pub fn image_generation_response() -> serde_json::Value {
    json!({
        "created": 1677610602,
        "data": [{
            "url": "https://example.com/image1.png",
            "revised_prompt": "A fluffy white cat sitting on a windowsill"
        }]
    })
}

/// Sample image generation response with base64 data
pub fn image_generation_response_b64() -> serde_json::Value {
    json!({
        "created": 1677610602,
        "data": [{
            "b64_json": TINY_PNG_B64
        }]
    })
}

/// Sample response whose only entry carries neither a URL nor base64 data
pub fn image_generation_response_without_image() -> serde_json::Value {
    json!({
        "created": 1677610602,
        "data": [{
            "revised_prompt": "A fluffy white cat"
        }]
    })
}

/// Provider response pointing at `url`, as the transport would return it
pub fn provider_response_with_url(url: &str) -> ProviderImageResponse {
    serde_json::from_value(json!({
        "created": 1677610602,
        "data": [{
            "url": url,
            "revised_prompt": "A fluffy white cat sitting on a windowsill"
        }]
    }))
    .expect("fixture deserializes")
}

/// Provider response with inline base64 data only
pub fn provider_response_b64() -> ProviderImageResponse {
    serde_json::from_value(image_generation_response_b64()).expect("fixture deserializes")
}
