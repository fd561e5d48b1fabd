use serde::{Deserialize, Serialize};

/// Default Google Custom Search endpoint
pub const GOOGLE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Google caps `num` at 10
pub const SEARCH_RESULT_COUNT: u32 = 10;

/// Results rendered into the injected system message
pub const DEFAULT_CONTEXT_RESULTS: usize = 3;

pub const SEARCH_TIMEOUT_SECS: u64 = 30;

/// Domains searched when none are configured; only the first ten are used
pub const DEFAULT_TRUSTED_SITES: &[&str] = &[
    "gov.hk",
    "ia.org.hk",
    "hkma.gov.hk",
    "info.gov.hk",
    "news.gov.hk",
    "scmp.com",
    "rthk.hk",
    "wikipedia.org",
    "reuters.com",
    "bbc.com",
    "bloomberg.com",
    "who.int",
];

/// Web search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Google API key
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Programmable search engine id (`cx`)
    pub engine_id: Option<String>,

    pub endpoint: String,

    /// Allow-list of domains the query is restricted to
    pub trusted_sites: Vec<String>,

    /// Interface language (`hl`)
    pub language: Option<String>,

    /// Geolocation of the end user (`gl`)
    pub geolocation: Option<String>,

    /// Country restrict (`cr`)
    pub country: Option<String>,

    /// Ask for the most recent results first
    pub sort_by_date: bool,

    pub context_results: usize,

    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            engine_id: None,
            endpoint: GOOGLE_SEARCH_URL.to_string(),
            trusted_sites: DEFAULT_TRUSTED_SITES.iter().map(|s| s.to_string()).collect(),
            language: Some("zh-CN".to_string()),
            geolocation: Some("hk".to_string()),
            country: Some("countryHK".to_string()),
            sort_by_date: true,
            context_results: DEFAULT_CONTEXT_RESULTS,
            timeout_secs: SEARCH_TIMEOUT_SECS,
        }
    }
}

impl SearchSettings {
    pub fn api_key(&self) -> Option<&str> {
        non_blank(&self.api_key)
    }

    pub fn engine_id(&self) -> Option<&str> {
        non_blank(&self.engine_id)
    }

    /// Both the key and the engine id are present
    pub fn has_credentials(&self) -> bool {
        self.api_key().is_some() && self.engine_id().is_some()
    }
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
