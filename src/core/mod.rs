// src/core/mod.rs
//! Domain core: identifiers, validation, persistence and services

pub mod config_manager;
pub mod database;
pub mod job_id;
pub mod job_service;
pub mod metrics;
pub mod validation;

pub use config_manager::ConfigManager;
pub use database::{Database, RecordStore, SqliteRecordStore};
pub use job_id::JobId;
pub use job_service::JobService;
pub use metrics::Metrics;
