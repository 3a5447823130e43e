// src/web/types.rs
use crate::types::{Application, Job};
use rocket::serde::{Deserialize, Serialize};

pub const JOB_UPDATED: &str = "Job updated successfully!";
pub const JOB_ADDED: &str = "Job added successfully!";
pub const APPLICATION_SUBMITTED: &str = "Application submitted successfully!";

/// `{ message, job }` returned by the update and creation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct JobMessageResponse {
    pub message: String,
    pub job: Job,
}

impl JobMessageResponse {
    pub fn updated(job: Job) -> Self {
        Self {
            message: JOB_UPDATED.to_string(),
            job,
        }
    }

    pub fn added(job: Job) -> Self {
        Self {
            message: JOB_ADDED.to_string(),
            job,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ApplicationResponse {
    pub message: String,
    pub application: Application,
}

impl ApplicationResponse {
    pub fn submitted(application: Application) -> Self {
        Self {
            message: APPLICATION_SUBMITTED.to_string(),
            application,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
}
