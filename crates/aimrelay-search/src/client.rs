use std::time::Duration;

use aimrelay_types::SearchResult;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::SearchError;
use crate::settings::{non_blank, SearchSettings, SEARCH_RESULT_COUNT};

/// Ranked web search
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

/// Response from the Custom Search JSON API
#[derive(Debug, Deserialize)]
struct GoogleSearchResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

/// Google Programmable Search (Custom Search JSON API) client
pub struct GoogleSearchClient {
    client: Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
    language: Option<String>,
    geolocation: Option<String>,
    country: Option<String>,
    sort_by_date: bool,
}

impl GoogleSearchClient {
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let api_key = settings
            .api_key()
            .ok_or(SearchError::MissingCredentials("GOOGLE_API_KEY"))?;
        let engine_id = settings
            .engine_id()
            .ok_or(SearchError::MissingCredentials("GOOGLE_CX"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
            language: non_blank(&settings.language).map(str::to_string),
            geolocation: non_blank(&settings.geolocation).map(str::to_string),
            country: non_blank(&settings.country).map(str::to_string),
            sort_by_date: settings.sort_by_date,
        })
    }

    fn query_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("cx", self.engine_id.clone()),
            ("q", query.to_string()),
            ("num", SEARCH_RESULT_COUNT.to_string()),
        ];

        if let Some(language) = &self.language {
            params.push(("hl", language.clone()));
        }
        if let Some(geolocation) = &self.geolocation {
            params.push(("gl", geolocation.clone()));
        }
        if let Some(country) = &self.country {
            params.push(("cr", country.clone()));
        }
        if self.sort_by_date {
            params.push(("sort", "date".to_string()));
        }

        params
    }
}

#[async_trait]
impl WebSearch for GoogleSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        debug!(query = %query, "Performing Google search");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(query))
            .send()
            .await?;

        // Check HTTP status
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let response_text = response.text().await?;
        let response: GoogleSearchResponse = serde_json::from_str(&response_text)?;

        info!("Google search returned {} results", response.items.len());
        Ok(response.items)
    }
}
