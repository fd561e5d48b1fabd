//! # aimrelay
//!
//! HTTP relay that forwards chat conversations to Perplexity, DeepSeek, Grok
//! and OpenAI, optionally grounding DeepSeek with trusted-site web search.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod web;

pub use cli::Cli;
pub use config::RelayConfig;
pub use dispatcher::{Dispatcher, Route};
pub use error::RelayError;
pub use web::{create_router, AppState};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::warn;

use web::{WebServer, WebServerConfig};

/// Run the relay server with a resolved configuration
pub async fn run_server(config: RelayConfig) -> Result<()> {
    let bind_addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_addr()))?;

    for name in config.missing_credentials() {
        warn!("{} is not set; requests that need it will fail", name);
    }

    let dispatcher = Arc::new(Dispatcher::from_config(&config)?);
    WebServer::new(WebServerConfig { bind_addr }, dispatcher)
        .start()
        .await
}
