use std::time::Duration;

use aimrelay_types::{Conversation, Message, ProviderReply};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::client::{ChatCompletion, ChatProvider};
use crate::config::{chat_completions_url, BackendType};
use crate::error::ProviderError;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

/// Client for any OpenAI-compatible chat-completions API (DeepSeek, xAI, OpenAI)
pub struct OpenAiCompatProvider {
    backend: BackendType,
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    pub fn new(
        backend: BackendType,
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ProviderError::Transport {
                provider: backend.as_str(),
                source,
            })?;

        Ok(Self {
            backend,
            api_key,
            api_url: chat_completions_url(&base_url),
            client,
        })
    }

    fn provider(&self) -> &'static str {
        self.backend.as_str()
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatProvider {
    fn backend(&self) -> BackendType {
        self.backend
    }

    async fn complete(
        &self,
        conversation: Conversation,
        model: &str,
    ) -> Result<ProviderReply, ProviderError> {
        let provider = self.provider();
        let request = CompletionRequest {
            model,
            messages: &conversation,
            stream: false,
        };

        debug!(provider, url = %self.api_url, model, "Sending chat completion");

        let transport = |source| ProviderError::Transport { provider, source };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                provider,
                status: status.as_u16(),
                body,
            });
        }

        let content = ChatCompletion::parse(provider, &body)?.into_content(provider)?;
        debug!(provider, content = %content, "API response");

        Ok(ProviderReply::new(content))
    }
}
