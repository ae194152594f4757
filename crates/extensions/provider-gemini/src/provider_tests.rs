    use super::*;
    use serde_json::json;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    fn request(key: &str) -> CompletionRequest {
        CompletionRequest::new(key, "SYSTEM RULES", "Instruction: hide images")
    }

    #[test]
    fn test_provider_defaults() {
        let provider = GeminiProvider::default();
        assert_eq!(provider.kind(), ProviderKind::Gemini);
        assert_eq!(provider.model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_build_request_prepends_system_prompt() {
        let provider = GeminiProvider::new("gemini-2.0-flash").with_generation(0.2, 1024);
        let api_request = provider.build_request(&request("k"));

        assert_eq!(api_request.contents.len(), 1);
        assert_eq!(api_request.contents[0].role, "user");
        assert_eq!(
            api_request.contents[0].parts[0].text.as_deref(),
            Some("SYSTEM RULES\n\nInstruction: hide images")
        );
        let config = api_request.generation_config.unwrap();
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_output_tokens, Some(1024));
    }

    #[test]
    fn test_request_overrides_generation_defaults() {
        let provider = GeminiProvider::new("m");
        let api_request = provider.build_request(&request("k").with_max_output_tokens(64));
        assert_eq!(api_request.generation_config.unwrap().max_output_tokens, Some(64));
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/models/gemini-2.0-flash:generateContent"))
            .and(matchers::query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "document.querySelectorAll('img').forEach(i => i.remove());" }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::with_base_url("gemini-2.0-flash", mock_server.uri());
        let text = provider.complete(request("test-key")).await.unwrap();
        assert_eq!(text, "document.querySelectorAll('img').forEach(i => i.remove());");
    }

    #[tokio::test]
    async fn test_complete_sends_single_user_part() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::body_partial_json(json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": "SYSTEM RULES\n\nInstruction: hide images" }]
                }],
                "generationConfig": { "maxOutputTokens": 2048 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok();" }] } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::with_base_url("gemini-2.0-flash", mock_server.uri());
        assert_eq!(provider.complete(request("k")).await.unwrap(), "ok();");
    }

    #[tokio::test]
    async fn test_complete_api_error_uses_backend_message() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::with_base_url("gemini-2.0-flash", mock_server.uri());
        match provider.complete(request("bad-key")).await.unwrap_err() {
            ProviderError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("API key not valid"));
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_error_without_body_uses_status_text() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::with_base_url("gemini-2.0-flash", mock_server.uri());
        match provider.complete(request("k")).await.unwrap_err() {
            ProviderError::ApiError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_rate_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED" }
            })))
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::with_base_url("gemini-2.0-flash", mock_server.uri());
        assert!(matches!(
            provider.complete(request("k")).await,
            Err(ProviderError::RateLimited(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_blocked_prompt() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::with_base_url("gemini-2.0-flash", mock_server.uri());
        match provider.complete(request("k")).await.unwrap_err() {
            ProviderError::InvalidResponse(message) => assert!(message.contains("SAFETY")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_network_error() {
        let provider = GeminiProvider::with_base_url("gemini-2.0-flash", "http://127.0.0.1:1");
        assert!(matches!(
            provider.complete(request("k")).await,
            Err(ProviderError::Network(_))
        ));
    }
