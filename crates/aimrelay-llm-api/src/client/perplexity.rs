use std::time::Duration;

use aimrelay_types::{Conversation, Message, ProviderReply};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use crate::client::{ChatCompletion, ChatProvider};
use crate::config::{chat_completions_url, BackendType};
use crate::error::ProviderError;

pub const MAX_TOKENS: u32 = 2000;

pub const REASONING_OPEN_TAG: &str = "<think>";
pub const REASONING_CLOSE_TAG: &str = "</think>";
pub const ASSISTANT_OPEN_TAG: &str = "<AIM AI助手>";
pub const ASSISTANT_CLOSE_TAG: &str = "</AIM AI助手>";

const PROVIDER: &str = "perplexity";

/// Swap the model's reasoning markers for the assistant's branded tags
pub fn rewrite_reasoning_tags(content: &str) -> String {
    content
        .replace(REASONING_OPEN_TAG, ASSISTANT_OPEN_TAG)
        .replace(REASONING_CLOSE_TAG, ASSISTANT_CLOSE_TAG)
}

#[derive(Debug, Serialize)]
struct PerplexityRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
}

/// Perplexity chat-completions client
///
/// Non-2xx responses keep their status so the relay can pass it through.
pub struct PerplexityProvider {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl PerplexityProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        Ok(Self {
            api_key,
            api_url: chat_completions_url(&base_url),
            client,
        })
    }
}

#[async_trait]
impl ChatProvider for PerplexityProvider {
    fn backend(&self) -> BackendType {
        BackendType::Perplexity
    }

    async fn complete(
        &self,
        conversation: Conversation,
        model: &str,
    ) -> Result<ProviderReply, ProviderError> {
        let request = PerplexityRequest {
            model,
            messages: &conversation,
            max_tokens: MAX_TOKENS,
        };

        debug!(provider = PROVIDER, url = %self.api_url, model, "Sending chat completion");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ProviderError::Transport {
            provider: PROVIDER,
            source,
        })?;

        if !status.is_success() {
            error!(provider = PROVIDER, status = status.as_u16(), body = %body, "HTTP error from upstream");
            return Err(ProviderError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        debug!(provider = PROVIDER, body = %body, "API response");

        let content = ChatCompletion::parse(PROVIDER, &body)?.into_content(PROVIDER)?;
        Ok(ProviderReply::new(rewrite_reasoning_tags(&content)))
    }
}
