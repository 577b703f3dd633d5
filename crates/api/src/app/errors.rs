use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopfront_remote::RemoteError;

/// Data-returning remote routes surface failures as server errors; there is
/// no retry and no fallback to the local store.
pub fn remote_error_to_response(err: RemoteError) -> axum::response::Response {
    match err {
        RemoteError::Unavailable(msg) => json_error(StatusCode::BAD_GATEWAY, "remote_unavailable", msg),
        RemoteError::Closed => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "client_closed",
            "remote catalog client is closed",
        ),
        RemoteError::Initialization { endpoint, reason } => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "remote_not_initialized",
            format!("{endpoint}: {reason}"),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
