//! Request dispatch: normalize, optionally ground with search, forward.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use aimrelay_llm_api::{BackendType, ChatProvider, ProviderError, ProviderFactory};
use aimrelay_search::{ContextAugmenter, SearchError};
use aimrelay_types::{ChatRequest, ProviderReply};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::RelayConfig;
use crate::error::RelayError;

/// A relay endpoint: which provider it forwards to and whether it searches first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub backend: BackendType,
    pub search: bool,
}

impl Route {
    pub const PERPLEXITY: Route = Route {
        path: "/api/ppxty",
        backend: BackendType::Perplexity,
        search: false,
    };
    pub const DEEPSEEK: Route = Route {
        path: "/api/ds",
        backend: BackendType::DeepSeek,
        search: false,
    };
    pub const DEEPSEEK_WITH_SEARCH: Route = Route {
        path: "/api/dswithsearch",
        backend: BackendType::DeepSeek,
        search: true,
    };
    pub const GROK: Route = Route {
        path: "/api/grok2",
        backend: BackendType::Grok,
        search: false,
    };
    pub const OPENAI: Route = Route {
        path: "/api/openai",
        backend: BackendType::OpenAI,
        search: false,
    };

    pub const ALL: [Route; 5] = [
        Route::PERPLEXITY,
        Route::DEEPSEEK,
        Route::DEEPSEEK_WITH_SEARCH,
        Route::GROK,
        Route::OPENAI,
    ];
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

/// Shared, read-only request handler behind every relay route
pub struct Dispatcher {
    providers: HashMap<BackendType, Arc<dyn ChatProvider>>,
    augmenter: Option<Arc<ContextAugmenter>>,
}

impl Dispatcher {
    pub fn new(
        providers: HashMap<BackendType, Arc<dyn ChatProvider>>,
        augmenter: Option<Arc<ContextAugmenter>>,
    ) -> Self {
        Self {
            providers,
            augmenter,
        }
    }

    /// Build one adapter per configured provider and the search augmenter
    ///
    /// Unconfigured providers are skipped; their routes answer with a
    /// configuration error.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let mut providers = HashMap::new();

        for backend in BackendType::ALL {
            match ProviderFactory::create(backend, config.providers.get(backend)) {
                Ok(provider) => {
                    providers.insert(provider.backend(), provider);
                }
                Err(ProviderError::MissingApiKey { .. }) => {
                    warn!(
                        provider = %backend,
                        "{} not set, provider disabled",
                        backend.api_key_env()
                    );
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("Failed to create {} client", backend));
                }
            }
        }

        let augmenter = match ContextAugmenter::from_settings(&config.search) {
            Ok(augmenter) => Some(Arc::new(augmenter)),
            Err(SearchError::MissingCredentials(name)) => {
                warn!("{} not set, search-grounded routes disabled", name);
                None
            }
            Err(err) => return Err(err).context("Failed to create search client"),
        };

        Ok(Self::new(providers, augmenter))
    }

    /// Normalize a raw request body and dispatch it
    pub async fn handle(&self, route: Route, body: &[u8]) -> Result<ProviderReply, RelayError> {
        let request = ChatRequest::from_slice(body)?;
        self.dispatch(route, request).await
    }

    /// Forward a normalized request along `route`
    pub async fn dispatch(
        &self,
        route: Route,
        request: ChatRequest,
    ) -> Result<ProviderReply, RelayError> {
        let provider = self.providers.get(&route.backend).ok_or_else(|| {
            RelayError::Configuration(format!(
                "{} is not configured",
                route.backend.api_key_env()
            ))
        })?;

        let augmenter = if route.search {
            let augmenter = self.augmenter.as_ref().ok_or_else(|| {
                RelayError::Configuration(
                    "Search credentials (GOOGLE_API_KEY, GOOGLE_CX) are not configured"
                        .to_string(),
                )
            })?;
            Some(augmenter)
        } else {
            None
        };

        let ChatRequest {
            conversation,
            model,
        } = request;

        info!(
            route = %route,
            model = %model,
            messages = conversation.len(),
            "Relaying chat request"
        );
        debug!(conversation = ?conversation, "Incoming conversation");

        let conversation = match augmenter {
            Some(augmenter) => augmenter.augment_conversation(conversation).await?,
            None => conversation,
        };

        let reply = provider.complete(conversation, &model).await?;
        debug!(route = %route, chars = reply.text.len(), "Provider replied");

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aimrelay_types::{Conversation, Message};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoProvider {
        seen: Mutex<Vec<(Conversation, String)>>,
    }

    #[async_trait]
    impl ChatProvider for EchoProvider {
        fn backend(&self) -> BackendType {
            BackendType::DeepSeek
        }

        async fn complete(
            &self,
            conversation: Conversation,
            model: &str,
        ) -> Result<ProviderReply, ProviderError> {
            let text = conversation
                .last()
                .map(|message| message.content.clone())
                .unwrap_or_default();
            self.seen
                .lock()
                .unwrap()
                .push((conversation, model.to_string()));
            Ok(ProviderReply::new(text))
        }
    }

    fn dispatcher_with(provider: Arc<EchoProvider>) -> Dispatcher {
        let mut providers: HashMap<BackendType, Arc<dyn ChatProvider>> = HashMap::new();
        providers.insert(BackendType::DeepSeek, provider);
        Dispatcher::new(providers, None)
    }

    #[test]
    fn test_route_table() {
        let table: Vec<(&str, BackendType, bool)> = Route::ALL
            .iter()
            .map(|route| (route.path, route.backend, route.search))
            .collect();
        assert_eq!(
            table,
            vec![
                ("/api/ppxty", BackendType::Perplexity, false),
                ("/api/ds", BackendType::DeepSeek, false),
                ("/api/dswithsearch", BackendType::DeepSeek, true),
                ("/api/grok2", BackendType::Grok, false),
                ("/api/openai", BackendType::OpenAI, false),
            ]
        );
        assert_eq!(Route::ALL.iter().filter(|route| route.search).count(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_forwards_conversation_and_model() {
        let provider = Arc::new(EchoProvider::default());
        let dispatcher = dispatcher_with(provider.clone());

        let body = br#"{"messages": [{"role": "user", "content": "hello"}], "model": "deepseek-chat"}"#;
        let reply = dispatcher.handle(Route::DEEPSEEK, body).await.unwrap();

        assert_eq!(reply.text, "hello");
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, vec![Message::user("hello")]);
        assert_eq!(seen[0].1, "deepseek-chat");
    }

    #[tokio::test]
    async fn test_validation_runs_before_configuration_checks() {
        let dispatcher = Dispatcher::new(HashMap::new(), None);

        let err = dispatcher.handle(Route::GROK, b"[]").await.unwrap_err();
        assert!(matches!(err, RelayError::Validation(_)));
    }

    #[tokio::test]
    async fn test_search_route_requires_augmenter() {
        let provider = Arc::new(EchoProvider::default());
        let dispatcher = dispatcher_with(provider.clone());

        let body = br#"{"messages": [{"role": "user", "content": "hello"}], "model": "x"}"#;
        let err = dispatcher
            .handle(Route::DEEPSEEK_WITH_SEARCH, body)
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::Configuration(_)));
        assert!(provider.seen.lock().unwrap().is_empty());
    }
}
