//! # C-SARNet CLI
//!
//! Command-line front-end for the C-SARNet backend: sign in, upload SAR
//! images, colorize them and follow processing jobs.
//!
//! ```bash
//! csarnet login --email ada@example.com --password '...'
//! csarnet colorize scene.tif -o scene.png
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use csarnet_core::ClientError;
use csarnet_infra::{ApiClient, ClientConfig, FileSessionStore, ReqwestTransport};

mod cli;
mod commands;
mod config;
mod telemetry;

use cli::Cli;
use config::AppConfig;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if e
                .downcast_ref::<ClientError>()
                .is_some_and(ClientError::requires_login)
            {
                eprintln!("Run `csarnet login` to sign in again.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env();
    if let Some(url) = cli.api_url {
        config.client = ClientConfig::new(url);
    }

    tracing::debug!(
        api = %config.client.base_url,
        session_file = %config.session_file.display(),
        "Configuration loaded"
    );

    let transport = ReqwestTransport::new(&config.transport)?;
    let store = FileSessionStore::new(config.session_file);
    let client = ApiClient::new(config.client, Arc::new(transport), Arc::new(store));

    commands::run(&client, cli.command).await
}
