// src/core/validation.rs
//! Field validation for candidate job and application records.
//!
//! Checks run in a fixed order and stop at the first failure, so the
//! reported reason for a given input is always the same.

use crate::types::{ApplicationFields, JobFields};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

pub const REQUIRED_JOB_FIELDS: [&str; 6] = [
    "name",
    "location",
    "description",
    "salary",
    "companyEmail",
    "companyName",
];

pub const REQUIRED_APPLICATION_FIELDS: [&str; 5] = ["name", "age", "education", "phone", "email"];

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field {0} is required!")]
    MissingField(&'static str),

    #[error("Salary must be a valid positive number!")]
    InvalidSalary,

    #[error("Please enter a valid email format.")]
    InvalidEmail,

    #[error("Age must be a valid positive number!")]
    InvalidAge,
}

/// Server-side job rules: required fields, then salary
pub fn validate_job(candidate: &Map<String, Value>) -> Result<JobFields, ValidationError> {
    if let Some(field) = first_missing_field(candidate, &REQUIRED_JOB_FIELDS) {
        return Err(ValidationError::MissingField(field));
    }

    let salary = candidate
        .get("salary")
        .and_then(parse_positive_number)
        .ok_or(ValidationError::InvalidSalary)?;

    Ok(JobFields {
        name: text(candidate, "name"),
        location: text(candidate, "location"),
        description: text(candidate, "description"),
        salary,
        company_email: text(candidate, "companyEmail"),
        company_name: text(candidate, "companyName"),
    })
}

/// Browser-side mirror of [`validate_job`], which also checks the email shape
pub fn validate_job_client(candidate: &Map<String, Value>) -> Result<JobFields, ValidationError> {
    let fields = validate_job(candidate)?;
    if !is_valid_email(&fields.company_email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(fields)
}

pub fn validate_application(
    candidate: &Map<String, Value>,
) -> Result<ApplicationFields, ValidationError> {
    if let Some(field) = first_missing_field(candidate, &REQUIRED_APPLICATION_FIELDS) {
        return Err(ValidationError::MissingField(field));
    }

    let age = candidate
        .get("age")
        .and_then(parse_positive_whole_number)
        .ok_or(ValidationError::InvalidAge)?;

    Ok(ApplicationFields {
        name: text(candidate, "name"),
        age,
        education: text(candidate, "education"),
        phone: text(candidate, "phone"),
        email: text(candidate, "email"),
    })
}

/// First field, in the given order, that is absent or empty
pub fn first_missing_field(
    candidate: &Map<String, Value>,
    required: &[&'static str],
) -> Option<&'static str> {
    required
        .iter()
        .copied()
        .find(|field| candidate.get(*field).and_then(field_text).is_none())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Accepts JSON numbers and numeric strings; rejects non-finite and non-positive values
pub fn parse_positive_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (number.is_finite() && number > 0.0).then_some(number)
}

fn parse_positive_whole_number(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => u32::try_from(n.as_u64()?).ok()?,
        Value::String(s) => s.trim().parse::<u32>().ok()?,
        _ => return None,
    };

    (number > 0).then_some(number)
}

// Scalars only; null, booleans, arrays and objects count as missing.
// Blank is judged on the trimmed text, but the value is kept as submitted.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => (!s.trim().is_empty()).then(|| s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text(candidate: &Map<String, Value>, field: &str) -> String {
    candidate
        .get(field)
        .and_then(field_text)
        .unwrap_or_default()
}
