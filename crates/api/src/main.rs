use std::sync::Arc;

use anyhow::Context;

use shopfront_api::app::{self, services};
use shopfront_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopfront_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    // A remote path that cannot connect aborts startup before any traffic is accepted.
    let services = Arc::new(
        services::build_services(&config)
            .await
            .context("failed to initialize services")?,
    );

    let app = app::build_app(Arc::clone(&services), config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    let remote = config
        .remote
        .as_ref()
        .map_or_else(|| "disabled".to_string(), |r| r.endpoint_uri());
    tracing::info!(
        addr = %listener.local_addr()?,
        remote = %remote,
        request_timeout_ms = config.request_timeout.as_millis() as u64,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    services.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
