// src/core/metrics.rs
//! Prometheus metrics exposed on `/metrics`

use anyhow::{Context, Result};
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    job_search_requests: IntCounter,
    http_requests: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let job_search_requests = IntCounter::new(
            "job_search_requests_total",
            "Total number of job search requests",
        )?;
        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status"],
        )?;

        registry.register(Box::new(job_search_requests.clone()))?;
        registry.register(Box::new(http_requests.clone()))?;

        // process CPU, memory and file descriptor gauges
        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            job_search_requests,
            http_requests,
        })
    }

    pub fn record_search(&self) {
        self.job_search_requests.inc();
    }

    pub fn record_response(&self, method: &str, status: u16) {
        self.http_requests
            .with_label_values(&[method, &status.to_string()])
            .inc();
    }

    pub fn search_requests(&self) -> u64 {
        self.job_search_requests.get()
    }

    /// Text exposition format
    pub fn gather(&self) -> Result<String> {
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output is not UTF-8")
    }
}
