//! Grounding a conversation with web search results.
//!
//! The pure functions here do the string assembly and list surgery;
//! [`ContextAugmenter`] wires them to a [`WebSearch`] backend.

use std::sync::Arc;

use aimrelay_types::{Conversation, Message, SearchResult};
use tracing::{debug, error, info, warn};

use crate::client::{GoogleSearchClient, WebSearch};
use crate::error::SearchError;
use crate::settings::SearchSettings;

pub const CONTEXT_PREAMBLE: &str = "Latest web search results:\n";

/// Upstream query-length limits allow at most this many `site:` filters
pub const MAX_SITE_FILTERS: usize = 10;

/// Index of the most recent user message
pub fn last_user_index(conversation: &[Message]) -> Option<usize> {
    conversation.iter().rposition(Message::is_user)
}

/// Content of the most recent user message, unless it is empty
pub fn search_query(conversation: &[Message]) -> Option<&str> {
    last_user_index(conversation)
        .map(|index| conversation[index].content.as_str())
        .filter(|query| !query.is_empty())
}

pub fn site_filter(domain: &str) -> String {
    if domain.starts_with("site:") {
        domain.to_string()
    } else {
        format!("site:{}", domain)
    }
}

/// Restrict `query` to the first ten trusted sites
///
/// `rust traits (site:doc.rust-lang.org OR site:docs.rs)`
pub fn enhanced_query(query: &str, trusted_sites: &[String]) -> String {
    let filters: Vec<String> = trusted_sites
        .iter()
        .map(|site| site.trim())
        .filter(|site| !site.is_empty())
        .take(MAX_SITE_FILTERS)
        .map(site_filter)
        .collect();

    if filters.is_empty() {
        return query.to_string();
    }

    format!("{} ({})", query, filters.join(" OR "))
}

/// Render the top `limit` results as the body of a system message
///
/// Returns `None` when there is nothing to inject.
pub fn render_context(results: &[SearchResult], limit: usize) -> Option<String> {
    if results.is_empty() || limit == 0 {
        return None;
    }

    let mut context = String::from(CONTEXT_PREAMBLE);
    for (idx, item) in results.iter().take(limit).enumerate() {
        context.push_str(&format!(
            "{}. [{}]({})\n{}\n\n",
            idx + 1,
            item.title(),
            item.link(),
            item.snippet()
        ));
    }

    Some(context)
}

/// Insert `context` as a system message directly before the last user message
///
/// A conversation without user messages is returned unchanged.
pub fn augment(conversation: Conversation, context: String) -> Conversation {
    let Some(index) = last_user_index(&conversation) else {
        return conversation;
    };

    let mut augmented = conversation;
    let tail = augmented.split_off(index);
    augmented.reserve(tail.len() + 1);
    augmented.push(Message::system(context));
    augmented.extend(tail);
    augmented
}

/// Runs one search per conversation and injects the results
pub struct ContextAugmenter {
    search: Arc<dyn WebSearch>,
    trusted_sites: Vec<String>,
    context_results: usize,
}

impl ContextAugmenter {
    pub fn new(search: Arc<dyn WebSearch>, trusted_sites: Vec<String>, context_results: usize) -> Self {
        Self {
            search,
            trusted_sites,
            context_results,
        }
    }

    /// Google-backed augmenter; fails when the key or engine id is missing
    pub fn from_settings(settings: &SearchSettings) -> Result<Self, SearchError> {
        let client = GoogleSearchClient::new(settings)?;
        Ok(Self::new(
            Arc::new(client),
            settings.trusted_sites.clone(),
            settings.context_results,
        ))
    }

    /// Search on the latest user message and ground the conversation with the hits
    ///
    /// Only a non-2xx answer from the search API is an error; transport and
    /// decoding failures leave the conversation as it was.
    pub async fn augment_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, SearchError> {
        let Some(query) = search_query(&conversation) else {
            debug!("No user query to search on, skipping augmentation");
            return Ok(conversation);
        };

        let query = enhanced_query(query, &self.trusted_sites);
        let results = match self.search.search(&query).await {
            Ok(results) => results,
            Err(err) if err.is_fatal() => {
                error!(error = %err, "Search API error");
                return Err(err);
            }
            Err(err) => {
                warn!(error = %err, "Search failed, continuing without context");
                Vec::new()
            }
        };

        match render_context(&results, self.context_results) {
            Some(context) => {
                info!(
                    results = results.len().min(self.context_results),
                    "Injecting search context"
                );
                Ok(augment(conversation, context))
            }
            None => Ok(conversation),
        }
    }
}
