// src/web/server_handle.rs
//! Owned handle to an in-process server bound to an ephemeral loopback port.

use crate::core::{JobService, Metrics};
use crate::web::build_rocket;
use anyhow::{Context, Result};
use rocket::config::{LogLevel, Shutdown as ShutdownConfig};
use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

const STARTUP_POLL_INTERVAL: Duration = Duration::from_millis(10);
const STARTUP_ATTEMPTS: usize = 500;

struct RunningServer {
    base_url: String,
    shutdown: rocket::Shutdown,
    task: JoinHandle<std::result::Result<(), String>>,
}

#[derive(Default)]
pub struct ServerHandle {
    running: Option<RunningServer>,
}

impl ServerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch the server, or return the existing endpoint if already running
    pub async fn start(&mut self, service: JobService, static_dir: &Path) -> Result<String> {
        if let Some(running) = &self.running {
            return Ok(running.base_url.clone());
        }

        let port = free_port()?;
        let config = rocket::Config {
            address: Ipv4Addr::LOCALHOST.into(),
            port,
            log_level: LogLevel::Off,
            shutdown: ShutdownConfig {
                ctrlc: false,
                grace: 1,
                mercy: 1,
                ..ShutdownConfig::default()
            },
            ..rocket::Config::debug_default()
        };

        let metrics = Metrics::new()?;
        let rocket = build_rocket(config, service, metrics, static_dir)
            .ignite()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to ignite server: {}", e))?;
        let shutdown = rocket.shutdown();

        let task = tokio::spawn(async move {
            rocket
                .launch()
                .await
                .map(|_| ())
                .map_err(|e| e.to_string())
        });

        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        wait_until_listening(addr, &task).await?;

        let base_url = format!("http://{}", addr);
        info!("Server listening at {}", base_url);

        self.running = Some(RunningServer {
            base_url: base_url.clone(),
            shutdown,
            task,
        });
        Ok(base_url)
    }

    pub fn base_url(&self) -> Option<&str> {
        self.running.as_ref().map(|r| r.base_url.as_str())
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Shut down and wait for the server task; no-op when not running
    pub async fn stop(&mut self) -> Result<()> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };

        running.shutdown.notify();
        running
            .task
            .await
            .context("Server task panicked")?
            .map_err(|e| anyhow::anyhow!("Server exited with error: {}", e))?;

        info!("Server at {} stopped", running.base_url);
        Ok(())
    }
}

fn free_port() -> Result<u16> {
    let listener =
        TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).context("Failed to reserve a local port")?;
    Ok(listener.local_addr()?.port())
}

async fn wait_until_listening(
    addr: SocketAddr,
    task: &JoinHandle<std::result::Result<(), String>>,
) -> Result<()> {
    for _ in 0..STARTUP_ATTEMPTS {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return Ok(());
        }
        if task.is_finished() {
            anyhow::bail!("Server exited before accepting connections on {}", addr);
        }
        tokio::time::sleep(STARTUP_POLL_INTERVAL).await;
    }
    anyhow::bail!("Server did not start listening on {}", addr)
}
