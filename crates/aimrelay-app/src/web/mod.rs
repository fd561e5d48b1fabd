pub mod error;
pub mod routes;
pub mod server;

pub use routes::{create_router, AppState};
pub use server::{WebServer, WebServerConfig};
