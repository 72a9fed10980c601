//! HTTP server startup.

use anyhow::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::{gateway_router, GatewayState};

/// Bind and serve the gateway router until the process exits.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = gateway_router(state);

    info!("Filehost HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
