mod fixtures;

use aimrelay_llm_api::{BackendType, ProviderError, ProviderFactory, ProviderSettings};
use aimrelay_types::Message;
use fixtures::{LLMMockServer, TEST_API_KEY};
use pretty_assertions::assert_eq;
use serde_json::json;

fn settings_for(server: &LLMMockServer) -> ProviderSettings {
    ProviderSettings {
        api_key: Some(TEST_API_KEY.to_string()),
        base_url: Some(server.uri()),
        timeout_secs: Some(5),
    }
}

#[tokio::test]
async fn test_perplexity_rewrites_reasoning_tags() {
    let server = LLMMockServer::new().await;
    server
        .mock_perplexity_success("sonar-reasoning", "<think>hmm</think>Final answer")
        .await;

    let provider = ProviderFactory::create(BackendType::Perplexity, &settings_for(&server)).unwrap();
    let reply = provider
        .complete(vec![Message::user("question")], "sonar-reasoning")
        .await
        .unwrap();

    assert_eq!(reply.text, "<AIM AI助手>hmm</AIM AI助手>Final answer");
}

#[tokio::test]
async fn test_perplexity_forwards_conversation_unchanged() {
    let server = LLMMockServer::new().await;
    server.mock_perplexity_success("r1-1776", "ok").await;

    let provider = ProviderFactory::create(BackendType::Perplexity, &settings_for(&server)).unwrap();
    let conversation = vec![Message::system("be terse"), Message::user("hi")];
    provider.complete(conversation, "r1-1776").await.unwrap();

    let bodies = server.received_bodies().await;
    assert_eq!(
        bodies[0],
        json!({
            "model": "r1-1776",
            "messages": [
                {"role": "system", "content": "be terse"},
                {"role": "user", "content": "hi"}
            ],
            "max_tokens": 2000
        })
    );
}

#[tokio::test]
async fn test_perplexity_error_keeps_upstream_status() {
    let server = LLMMockServer::new().await;
    server.mock_error(401, "invalid api key").await;

    let provider = ProviderFactory::create(BackendType::Perplexity, &settings_for(&server)).unwrap();
    let err = provider
        .complete(vec![Message::user("hi")], "sonar")
        .await
        .unwrap_err();

    assert_eq!(err.passthrough_status(), Some(401));
    assert_eq!(err.to_string(), "invalid api key");
}

#[tokio::test]
async fn test_deepseek_returns_content_verbatim() {
    let server = LLMMockServer::new().await;
    server
        .mock_openai_success("deepseek-reasoner", "<think>kept</think>hi")
        .await;

    let provider = ProviderFactory::create(BackendType::DeepSeek, &settings_for(&server)).unwrap();
    let reply = provider
        .complete(vec![Message::user("hello")], "deepseek-reasoner")
        .await
        .unwrap();

    assert_eq!(reply.text, "<think>kept</think>hi");
}

#[tokio::test]
async fn test_grok_sends_non_streaming_request() {
    let server = LLMMockServer::new().await;
    server.mock_openai_success("grok-2-latest", "hi").await;

    let provider = ProviderFactory::create(BackendType::Grok, &settings_for(&server)).unwrap();
    provider
        .complete(vec![Message::user("hello")], "grok-2-latest")
        .await
        .unwrap();

    let bodies = server.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["stream"], json!(false));
    assert!(bodies[0].get("max_tokens").is_none());
}

#[tokio::test]
async fn test_openai_compat_error_is_flattened() {
    let server = LLMMockServer::new().await;
    server.mock_error(429, "rate limited").await;

    let provider = ProviderFactory::create(BackendType::OpenAI, &settings_for(&server)).unwrap();
    let err = provider
        .complete(vec![Message::user("hello")], "gpt-4o")
        .await
        .unwrap_err();

    assert_eq!(err.passthrough_status(), None);
    assert!(err.to_string().contains("rate limited"));
}

#[tokio::test]
async fn test_missing_choices_is_an_error() {
    let server = LLMMockServer::new().await;
    server.mock_raw_json(json!({"choices": []})).await;

    let provider = ProviderFactory::create(BackendType::DeepSeek, &settings_for(&server)).unwrap();
    let err = provider
        .complete(vec![Message::user("hello")], "deepseek-chat")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MissingContent { provider: "deepseek" }));
}

#[tokio::test]
async fn test_null_content_is_an_error() {
    let server = LLMMockServer::new().await;
    server
        .mock_raw_json(json!({"choices": [{"message": {"role": "assistant", "content": null}}]}))
        .await;

    let provider = ProviderFactory::create(BackendType::Grok, &settings_for(&server)).unwrap();
    let err = provider
        .complete(vec![Message::user("hello")], "grok-2")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MissingContent { .. }));
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    let settings = ProviderSettings {
        api_key: Some(TEST_API_KEY.to_string()),
        base_url: Some("http://127.0.0.1:1".to_string()),
        timeout_secs: Some(2),
    };

    let provider = ProviderFactory::create(BackendType::DeepSeek, &settings).unwrap();
    let err = provider
        .complete(vec![Message::user("hello")], "deepseek-chat")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport { .. }));
}
