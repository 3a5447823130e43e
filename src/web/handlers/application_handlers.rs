// src/web/handlers/application_handlers.rs
use crate::core::JobService;
use crate::error::JobError;
use crate::web::handlers::job_handlers::candidate_from_body;
use crate::web::types::ApplicationResponse;

use rocket::http::Status;
use rocket::serde::json::{Json, Value};
use rocket::State;
use tracing::info;

pub async fn apply_job_handler(
    job_id: &str,
    body: Option<Json<Value>>,
    service: &State<JobService>,
) -> Result<(Status, Json<ApplicationResponse>), JobError> {
    info!("Application received for job {}", job_id);
    let candidate = candidate_from_body(body);
    let application = service.apply(job_id, &candidate).await?;
    Ok((
        Status::Created,
        Json(ApplicationResponse::submitted(application)),
    ))
}
