// src/types/job.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The six business fields of a job posting, already validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFields {
    pub name: String,
    pub location: String,
    pub description: String,
    pub salary: f64,
    pub company_email: String,
    pub company_name: String,
}

/// A persisted job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: JobFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationFields {
    pub name: String,
    pub age: u32,
    pub education: String,
    pub phone: String,
    pub email: String,
}

/// A submitted job application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: String,
    pub job_id: String,
    #[serde(flatten)]
    pub fields: ApplicationFields,
    pub submitted_at: DateTime<Utc>,
}

/// Filters for the search endpoint; blank values are treated as absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub classification: Option<String>,
}

impl SearchQuery {
    pub fn new(keyword: Option<String>, classification: Option<String>) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            keyword: non_blank(keyword),
            classification: non_blank(classification),
        }
    }
}
