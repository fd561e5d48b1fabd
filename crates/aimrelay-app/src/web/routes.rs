use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::dispatcher::{Dispatcher, Route};
use crate::error::RelayError;

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Successful relay response
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub message: String,
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new().route("/health", get(health));

    for route in Route::ALL {
        router = router.route(
            route.path,
            post(move |state: State<AppState>, body: Bytes| relay(state, route, body)),
        );
    }

    router.with_state(state)
}

/// GET /health - Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /api/* - Relay a conversation to the route's provider
///
/// The body is taken raw so that malformed payloads surface as a
/// validation error with a `detail` field.
async fn relay(
    State(state): State<AppState>,
    route: Route,
    body: Bytes,
) -> Result<Json<ChatReply>, RelayError> {
    match state.dispatcher.handle(route, &body).await {
        Ok(reply) => Ok(Json(ChatReply {
            message: reply.text,
        })),
        Err(err) => {
            error!(route = %route, status = err.status_code().as_u16(), error = %err, "Request failed");
            Err(err)
        }
    }
}
