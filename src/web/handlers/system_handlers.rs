// src/web/handlers/system_handlers.rs
use crate::core::{JobService, Metrics};
use crate::web::types::HealthResponse;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn health_handler(service: &State<JobService>) -> (Status, Json<HealthResponse>) {
    match service.store().ping().await {
        Ok(()) => {
            info!("Health check ok");
            (
                Status::Ok,
                Json(HealthResponse {
                    status: "ok".to_string(),
                }),
            )
        }
        Err(e) => {
            error!("Health check failed: {:#}", e);
            (
                Status::ServiceUnavailable,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                }),
            )
        }
    }
}

pub async fn metrics_handler(metrics: &State<Metrics>) -> Result<String, Status> {
    metrics.gather().map_err(|e| {
        error!("Failed to gather metrics: {:#}", e);
        Status::InternalServerError
    })
}
