// src/core/job_service.rs
//! Request-level operations over the record store.
//!
//! Each operation checks the identifier first, then the payload, then makes
//! at most one mutating store call. Failures are returned as [`JobError`]
//! and never retried.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::core::database::RecordStore;
use crate::core::validation::{validate_application, validate_job};
use crate::core::JobId;
use crate::error::JobError;
use crate::types::{Application, Job, SearchQuery};

pub const UPDATE_STORE_FAILURE: &str = "Error updating job";
pub const LOOKUP_STORE_FAILURE: &str = "Internal server error";
pub const CREATE_STORE_FAILURE: &str = "Error adding job";
pub const LIST_STORE_FAILURE: &str = "Failed to fetch jobs";
pub const SEARCH_STORE_FAILURE: &str = "Error searching jobs";
pub const APPLY_STORE_FAILURE: &str = "Error submitting application";

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn RecordStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Lookup Service
    pub async fn get_job(&self, id: &str) -> Result<Job, JobError> {
        let job_id = parse_id(id)?;

        match self.store.find_by_id(&job_id).await {
            Ok(Some(job)) => Ok(job),
            Ok(None) => {
                warn!("Job {} not found", job_id);
                Err(JobError::NotFound)
            }
            Err(e) => {
                error!("Error fetching job {}: {:#}", job_id, e);
                Err(JobError::store(LOOKUP_STORE_FAILURE, e))
            }
        }
    }

    /// Update Service: replaces all six fields of an existing record
    pub async fn update_job(&self, id: &str, candidate: &Map<String, Value>) -> Result<Job, JobError> {
        let job_id = parse_id(id)?;

        let fields = validate_job(candidate).map_err(|e| {
            warn!("Rejected update of job {}: {}", job_id, e);
            e
        })?;

        match self.store.find_by_id_and_replace(&job_id, &fields).await {
            Ok(Some(job)) => {
                info!("Updated job {} ({})", job.id, job.fields.name);
                Ok(job)
            }
            Ok(None) => {
                warn!("Update target {} not found", job_id);
                Err(JobError::NotFound)
            }
            Err(e) => {
                error!("Error editing job {}: {:#}", job_id, e);
                Err(JobError::store(UPDATE_STORE_FAILURE, e))
            }
        }
    }

    pub async fn create_job(&self, candidate: &Map<String, Value>) -> Result<Job, JobError> {
        let fields = validate_job(candidate).map_err(|e| {
            warn!("Rejected new job: {}", e);
            e
        })?;

        self.store.insert_job(&fields).await.map_err(|e| {
            error!("Error adding job: {:#}", e);
            JobError::store(CREATE_STORE_FAILURE, e)
        })
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>, JobError> {
        self.store.find_all().await.map_err(|e| {
            error!("Error fetching jobs: {:#}", e);
            JobError::store(LIST_STORE_FAILURE, e)
        })
    }

    pub async fn search_jobs(&self, query: &SearchQuery) -> Result<Vec<Job>, JobError> {
        let jobs = self.store.search(query).await.map_err(|e| {
            error!("Error searching jobs: {:#}", e);
            JobError::store(SEARCH_STORE_FAILURE, e)
        })?;

        info!(
            "Search keyword={:?} classification={:?} matched {} jobs",
            query.keyword,
            query.classification,
            jobs.len()
        );
        Ok(jobs)
    }

    pub async fn apply(
        &self,
        id: &str,
        candidate: &Map<String, Value>,
    ) -> Result<Application, JobError> {
        let job_id = parse_id(id)?;

        let fields = validate_application(candidate).map_err(|e| {
            warn!("Rejected application for job {}: {}", job_id, e);
            e
        })?;

        let exists = self.store.find_by_id(&job_id).await.map_err(|e| {
            error!("Error fetching job {} for application: {:#}", job_id, e);
            JobError::store(APPLY_STORE_FAILURE, e)
        })?;
        if exists.is_none() {
            warn!("Application target {} not found", job_id);
            return Err(JobError::NotFound);
        }

        self.store
            .insert_application(&job_id, &fields)
            .await
            .map_err(|e| {
                error!("Error submitting application for job {}: {:#}", job_id, e);
                JobError::store(APPLY_STORE_FAILURE, e)
            })
    }
}

fn parse_id(id: &str) -> Result<JobId, JobError> {
    id.parse::<JobId>().map_err(|e| {
        warn!("{}", e);
        JobError::InvalidIdentifier
    })
}
