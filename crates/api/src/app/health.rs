//! Liveness reporting.

use axum::response::{IntoResponse, Response};

use shopfront_remote::RemoteError;

/// Coarse up/down status, rendered as the literal `UP` or `DOWN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
    Down,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }

    /// Map the outcome of a remote bulk query to a status.
    ///
    /// Any successful answer is `Up`, including an empty list.
    pub fn from_probe<T>(probe: &Result<T, RemoteError>) -> Self {
        match probe {
            Ok(_) => Self::Up,
            Err(RemoteError::Unavailable(_) | RemoteError::Closed | RemoteError::Initialization { .. }) => {
                Self::Down
            }
        }
    }
}

impl IntoResponse for HealthStatus {
    fn into_response(self) -> Response {
        self.as_str().into_response()
    }
}
