//! Command dispatch. Each command maps onto one or two client calls and
//! prints its result to stdout.

mod account;
mod assistant;
mod imaging;

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use csarnet_core::domain::ImageUpload;
use csarnet_infra::ApiClient;

use crate::cli::Command;

pub async fn run(client: &ApiClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Health => imaging::health(client).await,
        Command::Login(args) => account::login(client, args).await,
        Command::Register(args) => account::register(client, args).await,
        Command::Logout => account::logout(client).await,
        Command::Whoami => account::whoami(client).await,
        Command::UpdateProfile(args) => account::update_profile(client, args).await,
        Command::Avatar { file } => account::avatar(client, &file).await,
        Command::Upload { file } => imaging::upload(client, &file).await,
        Command::Colorize { file, output } => {
            imaging::colorize(client, &file, output.as_deref()).await
        }
        Command::Sessions => print_json(&client.sessions().await?),
        Command::Images => print_json(&client.images().await?),
        Command::Stats => account::stats(client).await,
        Command::History => account::history(client).await,
        Command::Job(job) => imaging::job(client, job).await,
        Command::Ask { question } => {
            assistant::ask(&question.join(" "));
            Ok(())
        }
    }
}

/// Read an image from disk, inferring its MIME type from the extension.
async fn read_image(path: &Path) -> anyhow::Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    Ok(ImageUpload::from_path_bytes(path, bytes))
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
