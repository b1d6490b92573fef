use gauge_llm::openai::OpenAiClient;
use gauge_llm::traits::LlmClient;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn generate_flattens_output_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responses"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "output": [
                { "type": "reasoning", "content": [] },
                { "type": "message", "content": [
                    { "type": "output_text", "text": "Hello!" }
                ]}
            ],
            "usage": { "total_tokens": 42 }
        })))
        .mount(&server)
        .await;

    let client =
        OpenAiClient::new("sk-test".into(), "gpt-4o-mini".into(), Some(&server.uri())).unwrap();
    let resp = client.generate("Say hi", None, Some(10), Some(0.2)).await.unwrap();

    assert_eq!(resp.text, "Hello!");
    assert_eq!(resp.model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(resp.tokens_used, Some(42));
}

#[tokio::test]
async fn api_error_surfaces_as_llm_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided" }
        })))
        .mount(&server)
        .await;

    let client =
        OpenAiClient::new("sk-bad".into(), "gpt-4o-mini".into(), Some(&server.uri())).unwrap();
    let err = client.generate("Say hi", None, None, None).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Incorrect API key"), "got: {message}");
}

#[tokio::test]
async fn health_check_reports_rather_than_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "output": [
                { "type": "message", "content": [
                    { "type": "output_text", "text": "OK" }
                ]}
            ]
        })))
        .mount(&server)
        .await;

    let client =
        OpenAiClient::new("sk-test".into(), "gpt-4o-mini".into(), Some(&server.uri())).unwrap();
    assert!(client.health_check().await.unwrap());
}
