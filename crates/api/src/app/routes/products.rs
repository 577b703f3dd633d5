use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products-delayed", get(list_products_delayed))
        .route("/api/products/:id", get(get_product))
}

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let items = services.catalog().get_all().await;
    (StatusCode::OK, Json(&*items)).into_response()
}

pub async fn list_products_delayed(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.catalog().get_all_delayed().await;
    (StatusCode::OK, Json(&*items)).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: u64 = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };
    match services.catalog().get_by_id(id) {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => {
            tracing::debug!(product_id = id, "product not found");
            errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
    }
}
