// src/web/handlers/job_handlers.rs
use crate::core::{JobService, Metrics};
use crate::error::JobError;
use crate::types::{Job, SearchQuery};
use crate::web::types::JobMessageResponse;

use rocket::http::Status;
use rocket::serde::json::{Json, Value};
use rocket::State;
use serde_json::Map;
use tracing::info;

/// Missing, unparseable or non-object bodies are treated as empty records
pub fn candidate_from_body(body: Option<Json<Value>>) -> Map<String, Value> {
    match body.map(Json::into_inner) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

pub async fn view_job_handler(id: &str, service: &State<JobService>) -> Result<Json<Job>, JobError> {
    info!("Fetching job {}", id);
    service.get_job(id).await.map(Json)
}

pub async fn edit_job_handler(
    id: &str,
    body: Option<Json<Value>>,
    service: &State<JobService>,
) -> Result<Json<JobMessageResponse>, JobError> {
    info!("Editing job {}", id);
    let candidate = candidate_from_body(body);
    let job = service.update_job(id, &candidate).await?;
    Ok(Json(JobMessageResponse::updated(job)))
}

pub async fn add_job_handler(
    body: Option<Json<Value>>,
    service: &State<JobService>,
) -> Result<(Status, Json<JobMessageResponse>), JobError> {
    info!("Adding job");
    let candidate = candidate_from_body(body);
    let job = service.create_job(&candidate).await?;
    Ok((Status::Created, Json(JobMessageResponse::added(job))))
}

pub async fn view_jobs_handler(service: &State<JobService>) -> Result<Json<Vec<Job>>, JobError> {
    service.list_jobs().await.map(Json)
}

pub async fn search_jobs_handler(
    keyword: Option<String>,
    classification: Option<String>,
    service: &State<JobService>,
    metrics: &State<Metrics>,
) -> Result<Json<Vec<Job>>, JobError> {
    metrics.record_search();
    let query = SearchQuery::new(keyword, classification);
    service.search_jobs(&query).await.map(Json)
}
