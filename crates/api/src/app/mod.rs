//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the shared catalog store and remote client
//! - `routes/`: HTTP routes + handlers (local catalog, remote bridge, probes)
//! - `health.rs`: liveness status and its mapping from remote probe results
//! - `errors.rs`: consistent error responses

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod errors;
pub mod health;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The remote route group is mounted only when `services` carries a remote
/// client. A request still running after `request_timeout` is dropped, which
/// cancels any injected delay or remote call, and answered with `408`.
pub fn build_app(services: Arc<services::AppServices>, request_timeout: Duration) -> Router {
    let remote_enabled = services.remote().is_some();

    routes::router(remote_enabled)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(LatencyUnit::Millis),
                        ),
                )
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
}
