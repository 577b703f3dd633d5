use crate::app::health::HealthStatus;

/// Local liveness: there is no dependency to check.
pub async fn health() -> HealthStatus {
    HealthStatus::Up
}
