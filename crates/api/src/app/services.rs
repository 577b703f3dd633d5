use std::sync::Arc;
use std::time::Duration;

use shopfront_catalog::{CatalogStore, DelaySampler};
use shopfront_remote::{
    ProductSummary, RemoteCatalog, RemoteCatalogClient, RemoteError, translate_to_local,
};

use crate::app::health::HealthStatus;
use crate::config::ApiConfig;

/// Shared state behind every handler.
///
/// Both members are initialized before the router is built and are read-only
/// afterwards.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogStore>,
    remote: Option<Arc<dyn RemoteCatalog>>,
    probe_timeout: Duration,
}

/// Upper bound on a remote health probe; expiry reports `DOWN`.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Seed the local catalog and, when enabled, connect the remote client.
///
/// # Errors
/// [`RemoteError::Initialization`] if the remote path is enabled and the
/// channel cannot be established.
pub async fn build_services(config: &ApiConfig) -> Result<AppServices, RemoteError> {
    let catalog = Arc::new(CatalogStore::seeded(DelaySampler::from_os_rng()));
    tracing::info!(products = catalog.len(), "local catalog seeded");

    let remote = match &config.remote {
        Some(cfg) => {
            let client: Arc<dyn RemoteCatalog> = Arc::new(RemoteCatalogClient::connect(cfg).await?);
            Some(client)
        }
        None => {
            tracing::info!("remote catalog path disabled");
            None
        }
    };

    // The probe must answer before the request timeout cuts it off.
    let probe_timeout = DEFAULT_PROBE_TIMEOUT.min(config.request_timeout / 2);
    Ok(AppServices::new(catalog, remote).with_probe_timeout(probe_timeout))
}

impl AppServices {
    pub fn new(catalog: Arc<CatalogStore>, remote: Option<Arc<dyn RemoteCatalog>>) -> Self {
        Self {
            catalog,
            remote,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn remote(&self) -> Option<&dyn RemoteCatalog> {
        self.remote.as_deref()
    }

    fn require_remote(&self) -> Result<&dyn RemoteCatalog, RemoteError> {
        self.remote()
            .ok_or_else(|| RemoteError::unavailable("remote catalog path is disabled"))
    }

    pub async fn remote_products(&self) -> Result<Vec<ProductSummary>, RemoteError> {
        let products = self.require_remote()?.get_all_products().await?;
        Ok(products.into_iter().map(translate_to_local).collect())
    }

    pub async fn remote_product(&self, id: i32) -> Result<ProductSummary, RemoteError> {
        let product = self.require_remote()?.get_product_by_id(id).await?;
        Ok(translate_to_local(product))
    }

    /// Never fails: every probe outcome maps to a status, including a remote
    /// that does not answer within the probe timeout.
    pub async fn remote_health(&self) -> HealthStatus {
        let probe = match self.require_remote() {
            Ok(remote) => tokio::time::timeout(self.probe_timeout, remote.get_all_products())
                .await
                .unwrap_or_else(|_elapsed| {
                    Err(RemoteError::unavailable(format!(
                        "no answer within {}ms",
                        self.probe_timeout.as_millis()
                    )))
                }),
            Err(e) => Err(e),
        };
        let status = HealthStatus::from_probe(&probe);
        if let Err(e) = &probe {
            tracing::warn!(error = %e, "remote catalog health probe failed");
        }
        status
    }

    /// Release the remote connection. Called once, after the server drains.
    pub fn shutdown(&self) {
        if let Some(remote) = &self.remote {
            remote.close();
        }
    }
}
