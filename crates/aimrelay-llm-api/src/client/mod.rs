use aimrelay_types::{Conversation, ProviderReply};
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::BackendType;
use crate::error::ProviderError;

pub mod openai_compat;
pub mod perplexity;

/// Chat provider trait - unified interface for all upstream LLM providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn backend(&self) -> BackendType;

    /// Non-streaming chat completion, one attempt
    async fn complete(
        &self,
        conversation: Conversation,
        model: &str,
    ) -> Result<ProviderReply, ProviderError>;
}

/// Chat-completions response body, reduced to what the relay reads
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    pub(crate) fn parse(provider: &'static str, body: &str) -> Result<Self, ProviderError> {
        serde_json::from_str(body).map_err(|source| ProviderError::Decode { provider, source })
    }

    /// `choices[0].message.content`
    pub(crate) fn into_content(self, provider: &'static str) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::MissingContent { provider })
    }
}
