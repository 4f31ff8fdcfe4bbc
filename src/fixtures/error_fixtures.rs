//! Error response fixtures

use serde_json::json;

/// Sample 401 authentication error response
pub fn error_401_invalid_api_key() -> serde_json::Value {
    json!({
        "error": {
            "message": "Incorrect API key provided: sk-abc. You can find your API key at https://platform.openai.com/account/api-keys.",
            "type": "invalid_request_error",
            "param": null,
            "code": "invalid_api_key"
        }
    })
}

/// Sample 429 rate limit error response
pub fn error_429_rate_limit() -> serde_json::Value {
    json!({
        "error": {
            "message": "Rate limit reached for images per minute",
            "type": "rate_limit_error",
            "param": null,
            "code": "rate_limit_exceeded"
        }
    })
}

/// Sample 500 internal server error response
pub fn error_500_internal_server_error() -> serde_json::Value {
    json!({
        "error": {
            "message": "The server had an error while processing your request. Sorry about that!",
            "type": "server_error",
            "param": null,
            "code": null
        }
    })
}

/// Sample 400 invalid size error response
pub fn error_400_invalid_size() -> serde_json::Value {
    json!({
        "error": {
            "message": "'640x480' is not one of ['256x256', '512x512', '1024x1024', '1024x1792', '1792x1024'] - 'size'",
            "type": "invalid_request_error",
            "param": "size",
            "code": null
        }
    })
}

/// Sample 400 content policy rejection
pub fn error_400_content_policy_violation() -> serde_json::Value {
    json!({
        "error": {
            "message": "Your request was rejected as a result of our safety system. Your prompt may contain text that is not allowed by our Content Policy.",
            "type": "invalid_request_error",
            "param": null,
            "code": "content_policy_violation"
        }
    })
}

/// Builder for creating custom error responses
pub struct ErrorResponseBuilder {
    message: String,
    error_type: String,
    param: Option<String>,
    code: Option<String>,
}

impl ErrorResponseBuilder {
    pub fn new() -> Self {
        Self {
            message: "An error occurred".to_string(),
            error_type: "api_error".to_string(),
            param: None,
            code: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = error_type.into();
        self
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn build(self) -> serde_json::Value {
        json!({
            "error": {
                "message": self.message,
                "type": self.error_type,
                "param": self.param,
                "code": self.code
            }
        })
    }
}

impl Default for ErrorResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorCode, ErrorMapper};

    fn code_for(status: u16, body: serde_json::Value) -> ErrorCode {
        let body = serde_json::to_vec(&body).unwrap();
        let error = ErrorMapper::from_response(status, &http::HeaderMap::new(), &body);
        ErrorMapper::to_image_error(&error).code
    }

    #[test]
    fn test_fixtures_map_to_expected_codes() {
        assert_eq!(code_for(401, error_401_invalid_api_key()), ErrorCode::AuthenticationError);
        assert_eq!(code_for(429, error_429_rate_limit()), ErrorCode::RateLimitError);
        assert_eq!(
            code_for(400, error_400_content_policy_violation()),
            ErrorCode::ContentPolicyError
        );
        assert_eq!(code_for(400, error_400_invalid_size()), ErrorCode::ApiError);
        assert_eq!(code_for(500, error_500_internal_server_error()), ErrorCode::ApiError);
    }

    #[test]
    fn test_builder_output_parses() {
        let body = ErrorResponseBuilder::new()
            .with_message("custom")
            .with_type("invalid_request_error")
            .with_param("prompt")
            .with_code("bad_prompt")
            .build();
        let parsed = ErrorMapper::parse_error_response(&serde_json::to_vec(&body).unwrap()).unwrap();
        assert_eq!(parsed.error.message, "custom");
        assert_eq!(parsed.error.param.as_deref(), Some("prompt"));
    }
}
