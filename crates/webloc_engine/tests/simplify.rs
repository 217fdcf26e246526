use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use webloc_engine::{OpenRouterSimplifier, ServiceError, ServiceSettings, SimplificationService};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ServiceSettings {
    ServiceSettings {
        endpoint: format!("{}/api/v1/chat/completions", server.uri()),
        ..ServiceSettings::new("test-key")
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            {"message": {"role": "assistant", "content": content}}
        ]
    })
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn batch_reply_is_matched_by_position() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("x-title", "Filename Simplifier"))
        .and(body_partial_json(json!({
            "model": "deepseek/deepseek-chat-v3-0324:free",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"results": [{"original": "Long A", "simplified": "A"}, {"original": "Long B", "simplified": "B"}]}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let service = OpenRouterSimplifier::new(settings_for(&server)).unwrap();
    let slots = service
        .simplify_batch(&names(&["Long A", "Long B"]))
        .await
        .unwrap();
    assert_eq!(slots, vec![Some("A".to_string()), Some("B".to_string())]);
}

#[tokio::test]
async fn short_reply_leaves_trailing_slots_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("```json\n[\"a\", \"b\"]\n```")),
        )
        .mount(&server)
        .await;

    let service = OpenRouterSimplifier::new(settings_for(&server)).unwrap();
    let slots = service
        .simplify_batch(&names(&["1", "2", "3"]))
        .await
        .unwrap();
    assert_eq!(slots, vec![Some("a".to_string()), Some("b".to_string()), None]);
}

#[tokio::test]
async fn server_error_is_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let service = OpenRouterSimplifier::new(settings_for(&server)).unwrap();
    let err = service.simplify_batch(&names(&["x"])).await.unwrap_err();
    match err {
        ServiceError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn prose_reply_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("I can't do that.")))
        .mount(&server)
        .await;

    let service = OpenRouterSimplifier::new(settings_for(&server)).unwrap();
    let err = service.simplify_batch(&names(&["x"])).await.unwrap_err();
    assert!(matches!(err, ServiceError::MalformedResponse(_)));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(completion("[]")),
        )
        .mount(&server)
        .await;

    let settings = ServiceSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let service = OpenRouterSimplifier::new(settings).unwrap();
    let err = service.simplify_batch(&names(&["x"])).await.unwrap_err();
    assert!(matches!(err, ServiceError::Timeout));
}
