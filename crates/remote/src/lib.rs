//! gRPC bridge to the remote product catalog.
//!
//! This crate provides:
//! - [`RemoteCatalogClient`]: one long-lived plaintext channel, point and bulk
//!   queries, explicit [`RemoteCatalogClient::close`]
//! - [`RemoteCatalog`]: the query seam the HTTP layer depends on
//! - [`translate_to_local`]: wire record to locally exposed representation
//! - [`server`]: a reference implementation of the remote service
//!
//! ## Usage
//!
//! ```ignore
//! use shopfront_remote::{RemoteCatalog, RemoteCatalogClient, RemoteConfig};
//!
//! let client = RemoteCatalogClient::connect(&RemoteConfig::new("localhost", 8085)).await?;
//! let products = client.get_all_products().await?;
//! client.close();
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod translate;

pub use client::{RemoteCatalog, RemoteCatalogClient};
pub use config::RemoteConfig;
pub use error::RemoteError;
pub use translate::{ProductSummary, translate_to_local};

/// Generated protobuf types for the remote `product.Product` service.
pub mod proto {
    tonic::include_proto!("product");
}

pub use proto::{Empty, ProductListResponse, ProductRequest, ProductResponse};

/// Fully-qualified gRPC service name of the remote catalog.
pub const SERVICE_NAME: &str = "product.Product";
