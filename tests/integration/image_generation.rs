//! Integration tests for image generation

use super::*;
use integrations_imagegen::prelude::*;
use integrations_imagegen::ImageGenerationClient;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn generation_body(image_url: &str) -> serde_json::Value {
    json!({
        "created": 1700000000,
        "data": [{
            "url": image_url,
            "revised_prompt": "A tabby cat wearing a white space helmet, digital art"
        }]
    })
}

fn service_for(server: &wiremock::MockServer) -> ImageGenerationService {
    ImageGenerationClientBuilder::new()
        .with_config(config_for(server))
        .build_service()
        .expect("Failed to build service")
}

#[tokio::test]
async fn test_generate_and_auto_save_integration() {
    let mock_server = setup_mock_server().await;
    let image_url = format!("{}/files/cat.png", mock_server.uri());

    generation_request()
        .and(body_json(json!({
            "model": "dall-e-3",
            "prompt": "A cat wearing a space helmet!",
            "size": "1024x1024",
            "response_format": "url",
            "n": 1,
            "quality": "standard",
            "style": "vivid"
        })))
        .respond_with(success_response(generation_body(&image_url)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/cat.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG-integration".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let service = service_for(&mock_server);

    let result = service
        .generate_image(
            "A cat wearing a space helmet!",
            None,
            &SaveOptions::in_dir(dir.path().join("out")),
        )
        .await
        .expect("generation succeeds");

    let file_path = result.file_path.clone().expect("image was saved");
    assert!(file_path.starts_with(dir.path().join("out")));
    assert!(file_path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("a_cat_wearing_a_space_helmet_"));
    assert_eq!(std::fs::read(&file_path).unwrap(), b"\x89PNG-integration");
    assert_eq!(result.file_size(), Some(b"\x89PNG-integration".len()));
    assert_eq!(
        result.revised_prompt.as_deref(),
        Some("A tabby cat wearing a white space helmet, digital art")
    );
    assert_eq!(result.metadata.created_at.timestamp(), 1700000000);
}

#[tokio::test]
async fn test_generate_and_save_to_explicit_path_integration() {
    let mock_server = setup_mock_server().await;
    let image_url = format!("{}/files/explicit.png", mock_server.uri());

    generation_request()
        .respond_with(success_response(generation_body(&image_url)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/explicit.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"explicit".to_vec()))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("nested/dir/my_image.png");
    let service = service_for(&mock_server);

    let result = service
        .generate_and_save("A quiet harbor at dawn", &save_path, None)
        .await
        .expect("generation succeeds");

    assert_eq!(result.file_path.as_deref(), Some(save_path.as_path()));
    assert_eq!(std::fs::read(&save_path).unwrap(), b"explicit");
}

#[tokio::test]
async fn test_dall_e_2_request_omits_quality_and_style() {
    let mock_server = setup_mock_server().await;

    generation_request()
        .and(body_json(json!({
            "model": "dall-e-2",
            "prompt": "A red bicycle",
            "size": "512x512",
            "response_format": "url",
            "n": 1
        })))
        .respond_with(success_response(generation_body("https://example.com/bike.png")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let options = ImageOptions::new(ImageModel::DallE2, ImageSize::Size512)
        .with_quality(ImageQuality::Hd)
        .with_style(ImageStyle::Natural);

    let result = service
        .generate_image("A red bicycle", Some(options), &SaveOptions::disabled())
        .await
        .expect("generation succeeds");

    assert_eq!(result.image_url.as_deref(), Some("https://example.com/bike.png"));
    assert_eq!(result.metadata.quality, None);
}

#[tokio::test]
async fn test_authentication_error_integration() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(error_response(
            401,
            json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key"
                }
            }),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = service
        .generate_image("A cat", None, &SaveOptions::disabled())
        .await
        .unwrap_err();

    let image_error = err.as_image_error().expect("structured error");
    assert_eq!(image_error.code, ErrorCode::AuthenticationError);
    assert!(image_error
        .detail("original_error")
        .unwrap()
        .contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_rate_limit_error_integration() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(
            error_response(
                429,
                json!({
                    "error": {
                        "message": "Rate limit reached for images per minute",
                        "type": "rate_limit_error",
                        "code": "rate_limit_exceeded"
                    }
                }),
            )
            .insert_header("retry-after", "30"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = service
        .generate_image("A cat", None, &SaveOptions::disabled())
        .await
        .unwrap_err();

    let image_error = err.as_image_error().expect("structured error");
    assert_eq!(image_error.code, ErrorCode::RateLimitError);
    assert_eq!(image_error.detail("retry_after_secs"), Some("30"));
}

#[tokio::test]
async fn test_content_policy_error_integration() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(error_response(
            400,
            json!({
                "error": {
                    "message": "Your request was rejected as a result of our safety system.",
                    "type": "invalid_request_error",
                    "code": "content_policy_violation"
                }
            }),
        ))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = service
        .generate_image("A cat", None, &SaveOptions::disabled())
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::ContentPolicyError));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(error_response(
            500,
            json!({
                "error": {
                    "message": "The server had an error while processing your request.",
                    "type": "server_error",
                    "code": null
                }
            }),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = service
        .generate_image("A cat", None, &SaveOptions::disabled())
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::ApiError));
}

#[tokio::test]
async fn test_malformed_success_body_is_unknown_error() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = service
        .generate_image("A cat", None, &SaveOptions::disabled())
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::UnknownError));
}

#[tokio::test]
async fn test_download_failure_integration() {
    let mock_server = setup_mock_server().await;
    let image_url = format!("{}/files/expired.png", mock_server.uri());

    generation_request()
        .respond_with(success_response(generation_body(&image_url)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/expired.png"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let service = service_for(&mock_server);
    let err = service
        .generate_image("A cat", None, &SaveOptions::in_dir(dir.path()))
        .await
        .unwrap_err();

    let image_error = err.as_image_error().expect("structured error");
    assert_eq!(image_error.code, ErrorCode::DownloadError);
    assert_eq!(image_error.detail("url"), Some(image_url.as_str()));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_rejected_prompt_sends_nothing() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(success_response(generation_body("https://example.com/x.png")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    for prompt in ["", "   ", "graphic violence"] {
        let err = service
            .generate_image(prompt, None, &SaveOptions::disabled())
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}

#[tokio::test]
async fn test_client_reports_zero_created_when_absent() {
    let mock_server = setup_mock_server().await;

    generation_request()
        .respond_with(success_response(json!({
            "data": [{ "url": "https://example.com/a.png" }]
        })))
        .mount(&mock_server)
        .await;

    let client = ImageGenerationClient::from_config(config_for(&mock_server)).unwrap();
    let raw = client.generate_image("A cat", None).await.unwrap();

    assert_eq!(raw.created, 0);
    assert_eq!(raw.data.len(), 1);
    assert_eq!(raw.data[0].b64_json, None);
}
