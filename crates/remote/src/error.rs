use thiserror::Error;

/// Failures of the remote catalog path.
///
/// The remote service does not distinguish "no such id" from other failures,
/// so neither do we: every non-OK gRPC status is [`RemoteError::Unavailable`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Transport or remote-side failure of a query.
    #[error("remote catalog unavailable: {0}")]
    Unavailable(String),

    /// A query was issued after (or raced with) `close()`.
    #[error("remote catalog client is closed")]
    Closed,

    /// The channel could not be established at startup.
    #[error("failed to connect to remote catalog at {endpoint}: {reason}")]
    Initialization { endpoint: String, reason: String },
}

impl RemoteError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn initialization(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Initialization {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<tonic::Status> for RemoteError {
    fn from(status: tonic::Status) -> Self {
        Self::Unavailable(format!("{:?}: {}", status.code(), status.message()))
    }
}
