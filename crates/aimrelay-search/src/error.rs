use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The search API answered with a non-2xx status
    #[error("Search service error: {body}")]
    Status { status: u16, body: String },

    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("missing search credentials: {0} is not configured")]
    MissingCredentials(&'static str),
}

impl SearchError {
    /// Whether this failure must abort the request rather than degrade to no results
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SearchError::Status { .. } | SearchError::MissingCredentials(_)
        )
    }
}
