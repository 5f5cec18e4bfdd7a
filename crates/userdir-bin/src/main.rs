// ============================
// userdir-bin/src/main.rs
// ============================
//! Service entry point: settings, tracing, state, serve loop.
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use userdir_lib::{config::Settings, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize configuration
    let settings = Settings::load()?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create application state (seeds the admin account)
    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(settings)?);

    // Create the router
    let app = router::create_router(state);

    // Start the server
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
