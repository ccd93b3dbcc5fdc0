//! Atelier, an artwork marketplace gateway.
//!
//! A thin HTTP layer over a managed backend: routes validate input,
//! forward each request to the backend's REST interfaces, and reshape the
//! response into JSON. All persistent state (rows, sessions, objects, like
//! counters) lives in the managed service.

pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::routes::create_router;
use crate::state::{AppState, Backend};

/// Run the HTTP server with the given configuration.
pub async fn run_server(
    host: &str,
    port: u16,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    // Backend clients are built once; a rejected credential pair leaves the
    // server running with a fixed error on backend-dependent routes
    let backend = Backend::from_config(&config);
    if backend.is_configured() {
        info!("backend client configured for {}", config.supabase_url);
    }

    let state = AppState::new(backend, config);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Atelier listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
