//! Reference implementation of the remote catalog service.
//!
//! Serves a fixed sample dataset. Used by the `shopfront-catalog-server`
//! binary and by integration tests that need a real channel to talk to.

use std::future::Future;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use crate::proto::product_server::{Product, ProductServer};
use crate::proto::{Empty, ProductListResponse, ProductRequest, ProductResponse};

/// Answers every point query with a sample product carrying the requested id,
/// and every bulk query with the same two products.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalogService;

impl StaticCatalogService {
    pub fn sample_product(id: i32) -> ProductResponse {
        ProductResponse {
            id,
            name: "Sample Product".to_string(),
            price: 99.99,
            description: "This is a sample product".to_string(),
        }
    }

    pub fn sample_list() -> Vec<ProductResponse> {
        vec![
            ProductResponse {
                id: 1,
                name: "Product 1".to_string(),
                price: 50.00,
                description: "First product".to_string(),
            },
            ProductResponse {
                id: 2,
                name: "Product 2".to_string(),
                price: 75.00,
                description: "Second product".to_string(),
            },
        ]
    }
}

#[tonic::async_trait]
impl Product for StaticCatalogService {
    async fn get_product(
        &self,
        request: Request<ProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        let id = request.into_inner().id;
        tracing::info!(product_id = id, "serving product");
        Ok(Response::new(Self::sample_product(id)))
    }

    async fn get_products(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<ProductListResponse>, Status> {
        tracing::info!("serving all products");
        Ok(Response::new(ProductListResponse {
            products: Self::sample_list(),
        }))
    }
}

/// Serve `service` on an already-bound listener until `shutdown` resolves.
///
/// # Errors
/// Propagates tonic transport failures.
pub async fn serve<S, F>(
    service: S,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    S: Product,
    F: Future<Output = ()>,
{
    Server::builder()
        .add_service(ProductServer::new(service))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
}
