// src/client/edit_session.rs
//! The job edit flow: `Idle -> Editing -> Submitting -> {Succeeded, Failed}`.
//!
//! Field checks run locally before any request is made. Outcomes are kept
//! as a single [`Feedback`] message, mirroring the modal's error and
//! success regions in the browser.

use crate::client::{ClientConfig, ClientError, JobClient, JobForm};
use crate::core::validation::validate_job_client;
use crate::types::Job;
use crate::web::types::JOB_UPDATED;
use std::time::Duration;
use tracing::{error, info, warn};

pub const FETCH_FAILED: &str = "Error fetching job details.";
pub const UPDATE_FAILED: &str = "Error updating job";
const TRANSPORT_FALLBACK: &str = "Failed to fetch";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Error(String),
    Success(String),
}

impl Feedback {
    pub fn text(&self) -> &str {
        match self {
            Feedback::Error(text) | Feedback::Success(text) => text,
        }
    }
}

pub struct EditSession {
    client: JobClient,
    close_delay: Duration,
    state: EditState,
    job_id: Option<String>,
    form: JobForm,
    feedback: Option<Feedback>,
}

impl EditSession {
    pub fn new(client: JobClient, config: &ClientConfig) -> Self {
        Self {
            client,
            close_delay: config.close_delay,
            state: EditState::Idle,
            job_id: None,
            form: JobForm::default(),
            feedback: None,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn form(&self) -> &JobForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut JobForm {
        &mut self.form
    }

    /// Fetch the record and populate the form
    pub async fn open(&mut self, id: &str) -> EditState {
        self.feedback = None;

        match self.client.view_job(id).await {
            Ok(job) => self.edit(&job),
            Err(e) => {
                error!("Error fetching job {}: {}", id, e);
                self.job_id = None;
                self.fail(FETCH_FAILED.to_string());
            }
        }
        self.state
    }

    /// Start editing a record that is already loaded, e.g. from the listing
    pub fn edit(&mut self, job: &Job) {
        self.job_id = Some(job.id.clone());
        self.form = JobForm::from_job(job);
        self.feedback = None;
        self.state = EditState::Editing;
    }

    /// Validate locally, then send the update.
    ///
    /// Only acts from `Editing` or `Failed` with a record loaded; any other
    /// state is returned unchanged.
    pub async fn submit(&mut self) -> EditState {
        let Some(id) = self.job_id.clone() else {
            return self.state;
        };
        if !matches!(self.state, EditState::Editing | EditState::Failed) {
            return self.state;
        }

        self.feedback = None;

        if let Err(e) = validate_job_client(&self.form.to_candidate()) {
            warn!("Update of job {} rejected locally: {}", id, e);
            self.fail(e.to_string());
            return self.state;
        }

        self.state = EditState::Submitting;
        match self.client.edit_job(&id, &self.form).await {
            // a 2xx with an unreadable body still counts as success
            Ok(_) | Err(ClientError::Decode(_)) => {
                info!("Job update succeeded for {}", id);
                self.state = EditState::Succeeded;
                self.feedback = Some(Feedback::Success(JOB_UPDATED.to_string()));
            }
            Err(e) => {
                error!("Error updating job {}: {}", id, e);
                self.fail(failure_message(&e));
            }
        }
        self.state
    }

    /// After a success, wait the close delay, return to `Idle` and reload the listing.
    ///
    /// Returns `Ok(None)` without waiting when the last submit did not succeed.
    pub async fn finish(&mut self) -> Result<Option<Vec<Job>>, ClientError> {
        if self.state != EditState::Succeeded {
            return Ok(None);
        }

        tokio::time::sleep(self.close_delay).await;
        self.reset();

        self.client.view_jobs().await.map(Some)
    }

    /// Close the edit surface; refused while a request is in flight
    pub fn dismiss(&mut self) -> bool {
        if self.state == EditState::Submitting {
            return false;
        }
        self.reset();
        true
    }

    fn fail(&mut self, message: String) {
        self.state = EditState::Failed;
        self.feedback = Some(Feedback::Error(message));
    }

    fn reset(&mut self) {
        self.state = EditState::Idle;
        self.feedback = None;
        self.job_id = None;
        self.form = JobForm::default();
    }
}

/// User-visible text for a failed update request
pub fn failure_message(error: &ClientError) -> String {
    match error {
        ClientError::Status {
            message: Some(message),
            ..
        } if !message.is_empty() => message.clone(),
        ClientError::Status { .. } | ClientError::Decode(_) => UPDATE_FAILED.to_string(),
        ClientError::Transport(text) => {
            let text = if text.is_empty() {
                TRANSPORT_FALLBACK
            } else {
                text.as_str()
            };
            format!("{}: {}", UPDATE_FAILED, text)
        }
    }
}
