use thiserror::Error;

/// Failure of a single provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Non-2xx from an upstream whose status is passed through to the caller
    #[error("{body}")]
    UpstreamHttp { status: u16, body: String },

    /// Non-2xx from an OpenAI-compatible upstream; only the message survives
    #[error("{provider} API error: HTTP {status} - {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse {provider} response: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} response contained no message content")]
    MissingContent { provider: &'static str },

    #[error("missing API key for {provider}")]
    MissingApiKey { provider: &'static str },
}

impl ProviderError {
    /// Upstream status to relay to the client, if this error carries one
    pub fn passthrough_status(&self) -> Option<u16> {
        match self {
            ProviderError::UpstreamHttp { status, .. } => Some(*status),
            _ => None,
        }
    }
}
