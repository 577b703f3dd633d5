use anyhow::Context;
use shopfront_remote::server::{self, StaticCatalogService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopfront_observability::init();

    let addr = std::env::var("SHOPFRONT_GRPC_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8085".to_string());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        service = shopfront_remote::SERVICE_NAME,
        "remote catalog listening"
    );

    server::serve(StaticCatalogService, listener, async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("shutdown signal received");
    })
    .await?;

    Ok(())
}
