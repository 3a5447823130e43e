// src/client/api.rs
//! HTTP client for the job board endpoints

use crate::client::ClientConfig;
use crate::error::ErrorBody;
use crate::types::Job;
use crate::web::types::{ApplicationResponse, JobMessageResponse};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("{0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Editable job fields as entered in a form; every value is raw text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobForm {
    pub name: String,
    pub location: String,
    pub description: String,
    pub salary: String,
    pub company_email: String,
    pub company_name: String,
}

impl JobForm {
    pub fn from_job(job: &Job) -> Self {
        Self {
            name: job.fields.name.clone(),
            location: job.fields.location.clone(),
            description: job.fields.description.clone(),
            salary: job.fields.salary.to_string(),
            company_email: job.fields.company_email.clone(),
            company_name: job.fields.company_name.clone(),
        }
    }

    /// Trimmed field values keyed by their wire names
    pub fn to_candidate(&self) -> Map<String, Value> {
        [
            ("name", &self.name),
            ("location", &self.location),
            ("description", &self.description),
            ("salary", &self.salary),
            ("companyEmail", &self.company_email),
            ("companyName", &self.company_name),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.trim().to_string())))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub name: String,
    pub age: String,
    pub education: String,
    pub phone: String,
    pub email: String,
}

#[derive(Clone)]
pub struct JobClient {
    http: reqwest::Client,
    base_url: String,
}

impl JobClient {
    pub fn new(base_url: &str, config: &ClientConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn view_job(&self, id: &str) -> Result<Job, ClientError> {
        self.send(self.http.get(self.url(&format!("/view-job/{}", id))))
            .await
    }

    pub async fn edit_job(&self, id: &str, form: &JobForm) -> Result<JobMessageResponse, ClientError> {
        info!("Submitting update for job {}", id);
        self.send(
            self.http
                .put(self.url(&format!("/edit-job/{}", id)))
                .json(&form.to_candidate()),
        )
        .await
    }

    pub async fn add_job(&self, form: &JobForm) -> Result<JobMessageResponse, ClientError> {
        self.send(self.http.post(self.url("/add-job")).json(&form.to_candidate()))
            .await
    }

    pub async fn view_jobs(&self) -> Result<Vec<Job>, ClientError> {
        self.send(self.http.get(self.url("/view-jobs"))).await
    }

    pub async fn search_jobs(
        &self,
        keyword: &str,
        classification: &str,
    ) -> Result<Vec<Job>, ClientError> {
        self.send(
            self.http
                .get(self.url("/search-jobs"))
                .query(&[("keyword", keyword), ("classification", classification)]),
        )
        .await
    }

    pub async fn apply_job(
        &self,
        job_id: &str,
        form: &ApplicationForm,
    ) -> Result<ApplicationResponse, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!("/apply-job/{}", job_id)))
                .json(form),
        )
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))
        } else {
            // error bodies without a message field fall back to None
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.message);
            Err(ClientError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}
