//! Process configuration, read once from the environment at startup.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use shopfront_remote::RemoteConfig;
use thiserror::Error;

pub const BIND_ADDR: &str = "SHOPFRONT_BIND_ADDR";
pub const GRPC_HOST: &str = "SHOPFRONT_GRPC_HOST";
pub const GRPC_PORT: &str = "SHOPFRONT_GRPC_PORT";
pub const GRPC_ENABLED: &str = "SHOPFRONT_GRPC_ENABLED";
pub const GRPC_CONNECT_TIMEOUT_MS: &str = "SHOPFRONT_GRPC_CONNECT_TIMEOUT_MS";
pub const GRPC_RPC_TIMEOUT_MS: &str = "SHOPFRONT_GRPC_RPC_TIMEOUT_MS";
pub const REQUEST_TIMEOUT_SECS: &str = "SHOPFRONT_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,

    /// Upper bound on handling a single request. Expiry drops the handler,
    /// abandoning any injected delay.
    pub request_timeout: Duration,

    /// `None` when the remote-backed route group is disabled.
    pub remote: Option<RemoteConfig>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, BIND_ADDR, SocketAddr::from(([0, 0, 0, 0], 8080)))?;
        let request_timeout = Duration::from_secs(parse_or(&lookup, REQUEST_TIMEOUT_SECS, 30u64)?);

        let remote = if parse_flag(&lookup, GRPC_ENABLED, true)? {
            let host = lookup(GRPC_HOST).unwrap_or_else(|| "dotnet-app".to_string());
            let port = parse_or(&lookup, GRPC_PORT, 8085u16)?;
            let connect_timeout =
                Duration::from_millis(parse_or(&lookup, GRPC_CONNECT_TIMEOUT_MS, 5000u64)?);
            // Below the request timeout: a hung remote answers 502, not 408.
            let rpc_timeout =
                Duration::from_millis(parse_or(&lookup, GRPC_RPC_TIMEOUT_MS, 10_000u64)?);
            Some(
                RemoteConfig::new(host, port)
                    .with_connect_timeout(connect_timeout)
                    .with_rpc_timeout(rpc_timeout),
            )
        } else {
            None
        };

        Ok(Self {
            bind_addr,
            request_timeout,
            remote,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "expected a boolean".to_string(),
        }),
    }
}
