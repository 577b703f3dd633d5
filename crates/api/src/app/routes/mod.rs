use axum::{routing::get, Router};

pub mod grpc;
pub mod products;
pub mod system;

/// Router for every public endpoint.
///
/// The local and remote groups are independent; `remote_enabled` decides
/// whether `/api/grpc` exists at all.
pub fn router(remote_enabled: bool) -> Router {
    let router = Router::new()
        .route("/actuator/health", get(system::health))
        .merge(products::router());

    if remote_enabled {
        router.nest("/api/grpc", grpc::router())
    } else {
        router
    }
}
