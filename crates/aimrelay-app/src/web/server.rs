use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::dispatcher::{Dispatcher, Route};
use crate::web::routes;

/// Web server configuration
pub struct WebServerConfig {
    pub bind_addr: SocketAddr,
}

/// Web server instance
pub struct WebServer {
    config: WebServerConfig,
    dispatcher: Arc<Dispatcher>,
}

impl WebServer {
    pub fn new(config: WebServerConfig, dispatcher: Arc<Dispatcher>) -> Self {
        Self { config, dispatcher }
    }

    /// Start the web server and run until Ctrl-C
    pub async fn start(self) -> Result<()> {
        let app_state = routes::AppState {
            dispatcher: self.dispatcher,
        };

        // Browsers call the relay directly from any origin
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = routes::create_router(app_state)
            .layer(cors)
            .layer(TraceLayer::new_for_http());

        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr).await?;
        info!(address = %self.config.bind_addr, "aimrelay listening");
        for route in Route::ALL {
            info!(
                "   POST http://{}{} -> {}{}",
                self.config.bind_addr,
                route.path,
                route.backend,
                if route.search { " (with search)" } else { "" }
            );
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
