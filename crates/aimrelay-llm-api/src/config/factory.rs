use std::sync::Arc;

use tracing::debug;

use crate::client::{openai_compat::OpenAiCompatProvider, perplexity::PerplexityProvider, ChatProvider};
use crate::config::{mask_key, BackendType, ProviderSettings};
use crate::error::ProviderError;

/// Provider factory for creating chat providers
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a chat provider for the specified backend type
    ///
    /// # Arguments
    /// * `backend` - The backend type to use
    /// * `settings` - API key plus optional base URL and timeout overrides
    ///
    /// # Returns
    /// Arc-wrapped provider implementing the ChatProvider trait, or
    /// `MissingApiKey` when no key is configured
    pub fn create(
        backend: BackendType,
        settings: &ProviderSettings,
    ) -> Result<Arc<dyn ChatProvider>, ProviderError> {
        let api_key = settings
            .api_key()
            .ok_or(ProviderError::MissingApiKey {
                provider: backend.as_str(),
            })?
            .to_string();
        let base_url = settings.base_url_for(backend);
        let timeout = settings.timeout_for(backend);

        debug!(
            provider = backend.as_str(),
            base_url = %base_url,
            key = %mask_key(&api_key),
            timeout_secs = timeout.as_secs(),
            "Creating chat provider"
        );

        match backend {
            BackendType::Perplexity => Ok(Arc::new(PerplexityProvider::new(api_key, base_url, timeout)?)),
            // DeepSeek, xAI and OpenAI all speak the OpenAI chat-completions dialect
            BackendType::DeepSeek | BackendType::Grok | BackendType::OpenAI => Ok(Arc::new(
                OpenAiCompatProvider::new(backend, api_key, base_url, timeout)?,
            )),
        }
    }
}
