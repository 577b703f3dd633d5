//! REST-to-gRPC bridge: every handler forwards to the remote catalog and
//! translates the answer into the local representation.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::errors;
use crate::app::health::HealthStatus;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/health", get(health))
}

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.remote_products().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "remote product list failed");
            errors::remote_error_to_response(e)
        }
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: i32 = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };
    match services.remote_product(id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => {
            tracing::warn!(product_id = id, error = %e, "remote product lookup failed");
            errors::remote_error_to_response(e)
        }
    }
}

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> HealthStatus {
    services.remote_health().await
}
