// src/core/config_manager.rs
//! Configuration: built-in defaults, then `config.yaml`, then environment variables

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub address: String,
    pub database_url: String,
    pub static_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5050,
            address: "0.0.0.0".to_string(),
            database_url: "sqlite:jobs.db?mode=rwc".to_string(),
            static_dir: PathBuf::from("public"),
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            server: ServerSettings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    local: Option<ServerSettings>,
    production: Option<ServerSettings>,
}

impl ConfigManager {
    /// Load configuration for the environment named by `ENVIRONMENT`
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from("config.yaml");
        let file_contents = if config_path.exists() {
            Some(read_config_file(&config_path)?)
        } else {
            None
        };

        Self::resolve(file_contents.as_deref(), |key| std::env::var(key).ok())
    }

    fn resolve(
        file_contents: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "local".to_string());
        info!("Loading configuration for environment: {}", environment);

        let config_file: ConfigFile = match file_contents {
            Some(contents) => {
                serde_yaml::from_str(contents).context("Failed to parse config.yaml")?
            }
            None => ConfigFile::default(),
        };

        let mut server = match environment.as_str() {
            "production" => config_file.production,
            _ => config_file.local,
        }
        .unwrap_or_default();

        if let Some(port) = lookup("PORT") {
            server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", port))?;
        }
        if let Some(address) = lookup("BIND_ADDRESS") {
            server.address = address;
        }
        if let Some(database_url) = lookup("DB_CONNECT") {
            server.database_url = database_url;
        }
        if let Some(static_dir) = lookup("STATIC_DIR") {
            server.static_dir = PathBuf::from(static_dir);
        }

        Ok(Self {
            environment,
            server,
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    pub fn with_database_url(mut self, database_url: String) -> Self {
        self.server.database_url = database_url;
        self
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))
}
