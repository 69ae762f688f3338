use mongodb::Client;
use std::time::Instant;

/// Health check outcome for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database answered
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    /// Round-trip time in milliseconds
    pub response_time_ms: u64,
}

/// Cheap connectivity probe, suitable for readiness endpoints.
pub async fn check_health(client: &Client) -> bool {
    client.list_database_names().await.is_ok()
}

/// Connectivity probe with timing and error details.
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();

    match client.list_database_names().await {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}
