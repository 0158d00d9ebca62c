use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wardcall_server::store::spawn_sweeper;
use wardcall_server::{AppState, RoomStore, ServerConfig, router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::parse();
    let store = RoomStore::new();

    if let Some(ttl) = config.room_ttl() {
        spawn_sweeper(store.clone(), ttl, config.sweep_interval());
    } else {
        info!("room sweeping disabled, rooms live until explicit teardown");
    }

    let state = Arc::new(AppState {
        store,
        ice_servers: config.ice_servers(),
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("signaling server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
