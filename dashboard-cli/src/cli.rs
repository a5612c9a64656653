use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use dashboard_core::{
    AzureBlobStore, Config, ContainerStatus, DEFAULT_CITIES, Dashboard, Uploader,
    config::CONNECTION_STRING_ENV, source_from_config,
};
use inquire::{Password, PasswordDisplayMode};

use crate::output::ConsoleReporter;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-dashboard",
    version,
    about = "Fetch current weather for a list of cities and store each reading in blob storage"
)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and store readings (the default).
    Run {
        /// City to process; repeat to build the list. Defaults to the built-in five.
        #[arg(long = "city", value_name = "CITY")]
        cities: Vec<String>,
    },

    /// Save the OpenWeather API key and storage connection string.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Run { cities: Vec::new() }) {
            Command::Run { cities } => run_dashboard(cities).await,
            Command::Configure => configure(),
        }
    }
}

async fn run_dashboard(cities: Vec<String>) -> anyhow::Result<()> {
    let config = Config::resolve()?;

    let connection_string = config.connection_string().ok_or_else(|| {
        anyhow!(
            "No storage connection string configured.\n\
             Hint: set {CONNECTION_STRING_ENV} or run `weather-dashboard configure`."
        )
    })?;

    let store = AzureBlobStore::from_connection_string(connection_string)?;
    let uploader = Uploader::prepare(Arc::new(store), config.container())
        .await
        .with_context(|| format!("Failed to prepare container '{}'", config.container()))?;

    if uploader.container_status() == ContainerStatus::Created {
        println!("Container '{}' created.", uploader.container());
    }

    let dashboard = Dashboard::new(source_from_config(&config), uploader);
    let mut reporter = ConsoleReporter::stdout();

    if cities.is_empty() {
        dashboard.run(DEFAULT_CITIES.as_slice(), &mut reporter).await;
    } else {
        dashboard.run(cities.as_slice(), &mut reporter).await;
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    let connection_string = Password::new("Azure Storage connection string:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    // Empty input keeps the stored value.
    if !api_key.trim().is_empty() {
        config.openweather_api_key = Some(api_key.trim().to_string());
    }
    if !connection_string.trim().is_empty() {
        config.storage_connection_string = Some(connection_string.trim().to_string());
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
