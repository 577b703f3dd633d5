//! Remote catalog client.
//!
//! Owns the single channel to the remote `product.Product` service. The
//! channel multiplexes concurrent calls; each call works on a cheap clone of
//! the generated client, so nothing here serializes requests.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tonic::transport::{Channel, Endpoint};
use tracing::Instrument;

use crate::config::RemoteConfig;
use crate::error::RemoteError;
use crate::proto::product_client::ProductClient;
use crate::proto::{Empty, ProductRequest, ProductResponse};

/// Query seam for the remote catalog.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Point query. Any failure, including an unknown id, is an error.
    async fn get_product_by_id(&self, id: i32) -> Result<ProductResponse, RemoteError>;

    /// Bulk query.
    async fn get_all_products(&self) -> Result<Vec<ProductResponse>, RemoteError>;

    /// Release the underlying connection. Later queries fail with
    /// [`RemoteError::Closed`].
    fn close(&self);
}

#[async_trait]
impl<T> RemoteCatalog for Arc<T>
where
    T: RemoteCatalog + ?Sized,
{
    async fn get_product_by_id(&self, id: i32) -> Result<ProductResponse, RemoteError> {
        (**self).get_product_by_id(id).await
    }

    async fn get_all_products(&self) -> Result<Vec<ProductResponse>, RemoteError> {
        (**self).get_all_products().await
    }

    fn close(&self) {
        (**self).close();
    }
}

#[derive(Debug)]
enum Connection {
    Ready(ProductClient<Channel>),
    Closed,
}

/// Client for the remote catalog.
///
/// A value of this type only exists once connected; [`RemoteCatalogClient::close`]
/// is the only other transition and it is final.
#[derive(Debug)]
pub struct RemoteCatalogClient {
    endpoint: String,
    connection: RwLock<Connection>,
    shutdown: CancellationToken,
}

impl RemoteCatalogClient {
    /// Establish the plaintext channel. Does not retry.
    ///
    /// # Errors
    /// [`RemoteError::Initialization`] if the endpoint is malformed or the
    /// remote side cannot be reached within `connect_timeout`.
    pub async fn connect(cfg: &RemoteConfig) -> Result<Self, RemoteError> {
        let uri = cfg.endpoint_uri();
        let span = tracing::debug_span!("remote_connect", uri = %uri);

        async move {
            let mut endpoint = Endpoint::from_shared(uri.clone())
                .map_err(|e| RemoteError::initialization(&uri, e))?
                .connect_timeout(cfg.connect_timeout)
                .tcp_keepalive(Some(Duration::from_secs(30)))
                .http2_keep_alive_interval(Duration::from_secs(30))
                .keep_alive_timeout(Duration::from_secs(10));
            if let Some(timeout) = cfg.rpc_timeout {
                endpoint = endpoint.timeout(timeout);
            }

            let channel = endpoint.connect().await.map_err(|e| {
                tracing::error!(endpoint = %uri, error = %e, "remote catalog connect failed");
                RemoteError::initialization(&uri, e)
            })?;

            tracing::info!(
                endpoint = %uri,
                connect_timeout_ms = cfg.connect_timeout.as_millis() as u64,
                "connected to remote catalog"
            );

            Ok(Self {
                endpoint: uri,
                connection: RwLock::new(Connection::Ready(ProductClient::new(channel))),
                shutdown: CancellationToken::new(),
            })
        }
        .instrument(span)
        .await
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_closed(&self) -> bool {
        matches!(*self.read_connection(), Connection::Closed)
    }

    /// Release the channel.
    ///
    /// Later queries fail with [`RemoteError::Closed`]; queries already in
    /// flight resolve to the same error. Repeated calls are no-ops.
    pub fn close(&self) {
        {
            let mut conn = self
                .connection
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if matches!(*conn, Connection::Closed) {
                return;
            }
            *conn = Connection::Closed;
        }
        self.shutdown.cancel();
        tracing::info!(endpoint = %self.endpoint, "remote catalog client closed");
    }

    fn read_connection(&self) -> std::sync::RwLockReadGuard<'_, Connection> {
        self.connection.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn ready_client(&self) -> Result<ProductClient<Channel>, RemoteError> {
        match &*self.read_connection() {
            Connection::Ready(client) => Ok(client.clone()),
            Connection::Closed => Err(RemoteError::Closed),
        }
    }

    async fn call<T, F, Fut>(&self, method: &'static str, rpc: F) -> Result<T, RemoteError>
    where
        F: FnOnce(ProductClient<Channel>) -> Fut + Send,
        Fut: Future<Output = Result<tonic::Response<T>, tonic::Status>> + Send,
        T: Send,
    {
        let client = self.ready_client()?;

        tokio::select! {
            biased;
            () = self.shutdown.cancelled() => Err(RemoteError::Closed),
            result = rpc(client) => result.map(tonic::Response::into_inner).map_err(|status| {
                tracing::warn!(
                    method,
                    code = ?status.code(),
                    message = status.message(),
                    "remote catalog call failed"
                );
                RemoteError::from(status)
            }),
        }
    }
}

#[async_trait]
impl RemoteCatalog for RemoteCatalogClient {
    async fn get_product_by_id(&self, id: i32) -> Result<ProductResponse, RemoteError> {
        self.call("GetProduct", |mut client| async move {
            client.get_product(ProductRequest { id }).await
        })
        .await
    }

    async fn get_all_products(&self) -> Result<Vec<ProductResponse>, RemoteError> {
        let list = self
            .call("GetProducts", |mut client| async move {
                client.get_products(Empty {}).await
            })
            .await?;
        Ok(list.products)
    }

    fn close(&self) {
        RemoteCatalogClient::close(self);
    }
}
