use aimrelay_llm_api::ProviderError;
use aimrelay_search::SearchError;
use aimrelay_types::ValidationError;
use axum::http::StatusCode;
use thiserror::Error;

/// Everything a relay request can fail with
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Configuration(String),

    #[error("Search service error: {body}")]
    SearchService { status: u16, body: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl RelayError {
    /// HTTP status reported to the client
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RelayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::SearchService { .. } => StatusCode::BAD_GATEWAY,
            RelayError::Provider(err) => err
                .passthrough_status()
                .and_then(|status| StatusCode::from_u16(status).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl From<SearchError> for RelayError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Status { status, body } => RelayError::SearchService { status, body },
            SearchError::MissingCredentials(name) => {
                RelayError::Configuration(format!("{} is not configured", name))
            }
            // The augmenter degrades these to an ungrounded request and never returns them
            err @ (SearchError::Transport(_) | SearchError::Decode(_)) => {
                RelayError::SearchService {
                    status: StatusCode::BAD_GATEWAY.as_u16(),
                    body: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_codes() {
        let validation = RelayError::from(ValidationError::EmptyModel);
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let config = RelayError::Configuration("DEEPSEEK_API_KEY is not configured".into());
        assert_eq!(config.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let search = RelayError::from(SearchError::Status {
            status: 403,
            body: "quota".into(),
        });
        assert_eq!(search.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(search.to_string(), "Search service error: quota");
    }

    #[test]
    fn test_provider_status_passthrough() {
        let passthrough = RelayError::from(ProviderError::UpstreamHttp {
            status: 429,
            body: "rate limited".into(),
        });
        assert_eq!(passthrough.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(passthrough.to_string(), "rate limited");

        let flattened = RelayError::from(ProviderError::Api {
            provider: "DeepSeek",
            status: 401,
            body: "bad key".into(),
        });
        assert_eq!(flattened.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_search_credentials_is_configuration_error() {
        let err = RelayError::from(SearchError::MissingCredentials("GOOGLE_CX"));
        assert!(matches!(err, RelayError::Configuration(_)));
        assert_eq!(err.to_string(), "GOOGLE_CX is not configured");
    }
}
