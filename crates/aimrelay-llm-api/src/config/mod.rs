use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod factory;
pub use factory::ProviderFactory;

/// Upstream LLM providers the relay can forward to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    Perplexity,
    DeepSeek,
    Grok,
    OpenAI,
}

impl BackendType {
    pub const ALL: [BackendType; 4] = [
        BackendType::Perplexity,
        BackendType::DeepSeek,
        BackendType::Grok,
        BackendType::OpenAI,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Perplexity => "perplexity",
            Self::DeepSeek => "deepseek",
            Self::Grok => "grok",
            Self::OpenAI => "openai",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::Perplexity => "PERPLEXITY_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
            Self::Grok => "XAI_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Environment variable overriding this provider's base URL
    pub fn base_url_env(&self) -> &'static str {
        match self {
            Self::Perplexity => "PERPLEXITY_BASE_URL",
            Self::DeepSeek => "DEEPSEEK_BASE_URL",
            Self::Grok => "XAI_BASE_URL",
            Self::OpenAI => "OPENAI_BASE_URL",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Perplexity => PERPLEXITY_API_URL,
            Self::DeepSeek => DEEPSEEK_API_URL,
            Self::Grok => XAI_API_URL,
            Self::OpenAI => OPENAI_API_URL,
        }
    }

    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Perplexity => Duration::from_secs(PERPLEXITY_TIMEOUT_SECS),
            _ => Duration::from_secs(OPENAI_COMPAT_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default Perplexity API URL
pub const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai";

/// Default DeepSeek API URL
pub const DEEPSEEK_API_URL: &str = "https://api.deepseek.com";

/// Default xAI (Grok) API URL
pub const XAI_API_URL: &str = "https://api.x.ai/v1";

/// Default OpenAI API URL
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

pub const PERPLEXITY_TIMEOUT_SECS: u64 = 30;

/// Matches the OpenAI client's own default
pub const OPENAI_COMPAT_TIMEOUT_SECS: u64 = 600;

/// Per-provider connection settings; unset fields fall back to the backend defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ProviderSettings {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Configured key, treating an empty string as absent
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    pub fn base_url_for(&self, backend: BackendType) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| backend.default_base_url().to_string())
    }

    pub fn timeout_for(&self, backend: BackendType) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| backend.default_timeout())
    }
}

/// Build the chat-completions endpoint from a provider base URL
///
/// URLs that already point at a completions path are used as-is.
pub fn chat_completions_url(base_url: &str) -> String {
    if base_url.ends_with("/chat/completions") {
        return base_url.to_string();
    }

    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

const MASK_PREFIX_CHARS: usize = 6;

/// Keys shorter than this are masked entirely
const MASK_MIN_KEY_CHARS: usize = 12;

/// Show only the first few characters of a secret
pub fn mask_key(key: &str) -> String {
    if key.chars().count() < MASK_MIN_KEY_CHARS {
        return "***".to_string();
    }
    format!("{}***", key.chars().take(MASK_PREFIX_CHARS).collect::<String>())
}
