use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use crate::api;
use crate::state::SharedState;

pub async fn cmd_serve(
    state: Arc<SharedState>,
    port: Option<u16>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    let port = port.unwrap_or(state.config.server.port);
    info!(
        "Reelfinder v{} starting API server...",
        env!("CARGO_PKG_VERSION")
    );

    let app = api::router(api::create_app_state(state, prometheus_handle));
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server running at http://0.0.0.0:{}", port);

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!("Error listening for shutdown: {}", e),
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("API server stopped");
    Ok(())
}
