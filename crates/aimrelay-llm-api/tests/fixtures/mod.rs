use serde_json::json;
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";

/// Mock server utilities for testing provider adapters
pub struct LLMMockServer {
    server: MockServer,
}

impl LLMMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Successful chat-completions body carrying `content`
    pub fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl_test123",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "test-model",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 20,
                "total_tokens": 30
            }
        })
    }

    /// Mock successful Perplexity response, asserting the request shape
    pub async fn mock_perplexity_success(&self, model: &str, response_content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
            .and(body_partial_json(json!({
                "model": model,
                "max_tokens": 2000
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(Self::completion_body(response_content)),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock successful OpenAI-compatible response, asserting the request shape
    pub async fn mock_openai_success(&self, model: &str, response_content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
            .and(body_partial_json(json!({
                "model": model,
                "stream": false
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(Self::completion_body(response_content)),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock an upstream error with a raw text body
    pub async fn mock_error(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock a 200 response with an arbitrary JSON body
    pub async fn mock_raw_json(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Requests the server has seen, decoded as JSON
    pub async fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap_or_default())
            .collect()
    }
}
