//! Remote channel configuration.

use std::time::Duration;

/// Where and how to reach the remote catalog.
///
/// The channel is always plaintext (`http://`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub host: String,
    pub port: u16,

    /// Timeout for establishing the channel at startup.
    pub connect_timeout: Duration,

    /// Per-RPC timeout applied by the transport. `None` waits indefinitely.
    pub rpc_timeout: Option<Duration>,
}

impl RemoteConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: Duration::from_secs(5),
            rpc_timeout: None,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = Some(timeout);
        self
    }

    pub fn endpoint_uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
