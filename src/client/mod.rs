// src/client/mod.rs
//! Client side of the job board: typed HTTP calls and the job edit flow

pub mod api;
pub mod edit_session;

pub use api::{ApplicationForm, ClientError, JobClient, JobForm};
pub use edit_session::{EditSession, EditState, Feedback};

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout_seconds: u64,
    /// How long a success message stays visible before the edit surface closes
    pub close_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            close_delay: Duration::from_millis(1500),
        }
    }
}

impl ClientConfig {
    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}
