//! Tracing/logging setup shared by the shopfront binaries.

/// Initialize process-wide logging with the format chosen by
/// `SHOPFRONT_LOG_FORMAT` (`json`, the default, or `pretty`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let format = std::env::var("SHOPFRONT_LOG_FORMAT")
        .ok()
        .and_then(|v| tracing::LogFormat::parse(&v))
        .unwrap_or_default();
    tracing::init(format);
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;
