// src/error.rs
use crate::core::validation::ValidationError;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const INVALID_JOB_ID: &str = "Invalid job ID!";
pub const JOB_NOT_FOUND: &str = "Job not found!";

#[derive(Error, Debug)]
pub enum JobError {
    #[error("Invalid job ID!")]
    InvalidIdentifier,

    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),

    #[error("Job not found!")]
    NotFound,

    /// `message` is the operation-specific text shown to the caller;
    /// `detail` is the underlying store error
    #[error("{message}: {detail}")]
    Store {
        message: &'static str,
        detail: String,
    },
}

/// JSON body of every failed response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }
}

impl JobError {
    pub fn store(message: &'static str, source: anyhow::Error) -> Self {
        JobError::Store {
            message,
            detail: source.to_string(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            JobError::InvalidIdentifier | JobError::ValidationFailed(_) => Status::BadRequest,
            JobError::NotFound => Status::NotFound,
            JobError::Store { .. } => Status::InternalServerError,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            JobError::Store { message, detail } => ErrorBody {
                message: message.to_string(),
                error: Some(detail.clone()),
            },
            other => ErrorBody::new(other.to_string()),
        }
    }
}

impl<'r> Responder<'r, 'static> for JobError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status(), Json(self.body())).respond_to(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(JobError::InvalidIdentifier.status(), Status::BadRequest);
        assert_eq!(
            JobError::from(ValidationError::InvalidSalary).status(),
            Status::BadRequest
        );
        assert_eq!(JobError::NotFound.status(), Status::NotFound);
        assert_eq!(
            JobError::store("Error updating job", anyhow::anyhow!("boom")).status(),
            Status::InternalServerError
        );
    }

    #[test]
    fn test_bodies_carry_exact_messages() {
        assert_eq!(JobError::InvalidIdentifier.body(), ErrorBody::new(INVALID_JOB_ID));
        assert_eq!(JobError::NotFound.body(), ErrorBody::new(JOB_NOT_FOUND));
        assert_eq!(
            JobError::from(ValidationError::MissingField("salary")).body(),
            ErrorBody::new("Field salary is required!")
        );
    }

    #[test]
    fn test_store_error_keeps_underlying_text() {
        let body = JobError::store("Internal server error", anyhow::anyhow!("Database error")).body();
        assert_eq!(body.message, "Internal server error");
        assert_eq!(body.error.as_deref(), Some("Database error"));
    }

    #[test]
    fn test_error_body_omits_absent_detail() {
        let value = serde_json::to_value(ErrorBody::new(JOB_NOT_FOUND)).unwrap();
        assert_eq!(value, serde_json::json!({ "message": "Job not found!" }));
    }
}
