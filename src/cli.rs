// src/cli.rs
use crate::core::{ConfigManager, Database, RecordStore};
use crate::start_web_server;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "job-board")]
#[command(about = "Job listing server and record store maintenance")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Overrides the configured database URL
    #[arg(long, global = true)]
    pub database_url: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create tables and indexes
    Migrate,
    /// Print every stored job
    List,
    /// Delete all jobs and applications
    Purge,
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    let config = match cli.database_url {
        Some(url) => config.with_database_url(url),
        None => config,
    };

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            let config = match port {
                Some(port) => config.with_port(port),
                None => config,
            };
            start_web_server(config).await
        }

        Command::Migrate => {
            // connect runs the migrations
            Database::connect(&config.server.database_url).await?;
            info!("Database ready at {}", config.server.database_url);
            Ok(())
        }

        Command::List => {
            let db = Database::connect(&config.server.database_url).await?;
            let jobs = db.record_store().find_all().await?;

            if jobs.is_empty() {
                info!("No jobs found.");
                return Ok(());
            }

            info!(
                "{:<26} {:<30} {:<20} {:>10} {:<25}",
                "ID", "Name", "Location", "Salary", "Company"
            );
            info!("{}", "-".repeat(115));
            for job in jobs {
                info!(
                    "{:<26} {:<30} {:<20} {:>10} {:<25}",
                    job.id,
                    job.fields.name,
                    job.fields.location,
                    job.fields.salary,
                    job.fields.company_name
                );
            }
            Ok(())
        }

        Command::Purge => {
            let db = Database::connect(&config.server.database_url).await?;
            let removed = db.record_store().delete_all().await?;
            info!("Removed {} jobs and their applications", removed);
            Ok(())
        }
    }
}
