// src/web/mod.rs

pub mod handlers;
pub mod server_handle;
pub mod types;

pub use server_handle::ServerHandle;
pub use types::*;

use crate::core::{ConfigManager, Database, JobService, Metrics};
use crate::error::{ErrorBody, JobError};
use crate::types::Job;
use anyhow::{Context, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Provider;
use rocket::fs::{FileServer, Options};
use rocket::http::{Header, Status};
use rocket::serde::json::{Json, Value};
use rocket::{catchers, get, options, post, put, routes, Build, Request, Response, Rocket, State};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

/// Counts every response by method and status
pub struct RequestMetrics(Metrics);

#[rocket::async_trait]
impl Fairing for RequestMetrics {
    fn info(&self) -> Info {
        Info {
            name: "Count HTTP responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        self.0
            .record_response(request.method().as_str(), response.status().code);
    }
}

#[get("/view-job/<id>")]
pub async fn view_job(id: &str, service: &State<JobService>) -> Result<Json<Job>, JobError> {
    handlers::view_job_handler(id, service).await
}

#[put("/edit-job/<id>", data = "<body>")]
pub async fn edit_job(
    id: &str,
    body: Option<Json<Value>>,
    service: &State<JobService>,
) -> Result<Json<JobMessageResponse>, JobError> {
    handlers::edit_job_handler(id, body, service).await
}

#[post("/add-job", data = "<body>")]
pub async fn add_job(
    body: Option<Json<Value>>,
    service: &State<JobService>,
) -> Result<(Status, Json<JobMessageResponse>), JobError> {
    handlers::add_job_handler(body, service).await
}

#[get("/view-jobs")]
pub async fn view_jobs(service: &State<JobService>) -> Result<Json<Vec<Job>>, JobError> {
    handlers::view_jobs_handler(service).await
}

#[get("/search-jobs?<keyword>&<classification>")]
pub async fn search_jobs(
    keyword: Option<String>,
    classification: Option<String>,
    service: &State<JobService>,
    registry: &State<Metrics>,
) -> Result<Json<Vec<Job>>, JobError> {
    handlers::search_jobs_handler(keyword, classification, service, registry).await
}

#[post("/apply-job/<job_id>", data = "<body>")]
pub async fn apply_job(
    job_id: &str,
    body: Option<Json<Value>>,
    service: &State<JobService>,
) -> Result<(Status, Json<ApplicationResponse>), JobError> {
    handlers::apply_job_handler(job_id, body, service).await
}

#[get("/health")]
pub async fn health(service: &State<JobService>) -> (Status, Json<HealthResponse>) {
    handlers::health_handler(service).await
}

#[get("/metrics")]
pub async fn export_metrics(registry: &State<Metrics>) -> Result<String, Status> {
    handlers::metrics_handler(registry).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> (Status, Json<ErrorBody>) {
    (
        Status::BadRequest,
        Json(ErrorBody::new("Invalid request format")),
    )
}

#[rocket::catch(404)]
pub fn not_found() -> (Status, Json<ErrorBody>) {
    (Status::NotFound, Json(ErrorBody::new("Not found")))
}

#[rocket::catch(422)]
pub fn unprocessable() -> (Status, Json<ErrorBody>) {
    (
        Status::UnprocessableEntity,
        Json(ErrorBody::new("Invalid request body")),
    )
}

#[rocket::catch(500)]
pub fn internal_error() -> (Status, Json<ErrorBody>) {
    (
        Status::InternalServerError,
        Json(ErrorBody::new("Internal server error")),
    )
}

/// Assemble the application over an already-connected service
pub fn build_rocket<P: Provider>(
    provider: P,
    service: JobService,
    metrics: Metrics,
    static_dir: &Path,
) -> Rocket<Build> {
    rocket::custom(provider)
        .attach(Cors)
        .attach(RequestMetrics(metrics.clone()))
        .manage(service)
        .manage(metrics)
        .register(
            "/",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/",
            routes![
                view_job,
                edit_job,
                add_job,
                view_jobs,
                search_jobs,
                apply_job,
                health,
                export_metrics,
                options,
            ],
        )
        .mount("/", FileServer::new(static_dir, Options::Index | Options::Missing))
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let settings = config.server;

    let db = Database::connect(&settings.database_url).await.map_err(|e| {
        error!("Failed to initialize database: {:#}", e);
        e
    })?;
    let service = JobService::new(Arc::new(db.record_store()));
    let metrics = Metrics::new().context("Failed to create metrics registry")?;

    info!("Starting job board server");
    info!("Environment: {}", config.environment);
    info!("Database: {}", settings.database_url);
    info!("Static assets: {}", settings.static_dir.display());
    info!("Server: http://{}:{}", settings.address, settings.port);

    let figment = rocket::Config::figment()
        .merge(("port", settings.port))
        .merge(("address", settings.address.clone()));

    build_rocket(figment, service, metrics, &settings.static_dir)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
