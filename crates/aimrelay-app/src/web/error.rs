use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::error::RelayError;

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "detail": self.to_string(),
        }));

        (status, body).into_response()
    }
}
