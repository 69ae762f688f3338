//! Readiness endpoint

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};

use crate::state::AppState;

/// Readiness probe: ready only when MongoDB answers.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async {
            let status = database::mongodb::check_health_detailed(&state.mongo_client).await;
            if status.healthy {
                Ok(())
            } else {
                Err(status
                    .message
                    .unwrap_or_else(|| "unreachable".to_string()))
            }
        }),
    )];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
