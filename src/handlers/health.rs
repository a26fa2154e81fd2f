use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::{database, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: &'static str,
    pub storage: &'static str,
    pub storage_type: String,
}

/// Probe the database and the bucket. Always 200; `status` says whether both answered.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, storage) = tokio::join!(
        database::ping(&state.pool),
        state.storage.list_objects("", 1)
    );

    let database = match db {
        Ok(()) => "UP",
        Err(err) => {
            warn!(error = %err, "Database health check failed");
            "DOWN"
        }
    };
    let storage_status = match storage {
        Ok(_) => "UP",
        Err(err) => {
            warn!(error = %err, "Storage health check failed");
            "DOWN"
        }
    };

    let status = if database == "UP" && storage_status == "UP" {
        "UP"
    } else {
        "DEGRADED"
    };

    Json(HealthResponse {
        status,
        timestamp: Utc::now(),
        database,
        storage: storage_status,
        storage_type: state.storage.kind().to_string(),
    })
}
