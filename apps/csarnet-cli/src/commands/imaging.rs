use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use csarnet_core::domain::ProcessingJob;
use csarnet_infra::ApiClient;

use super::{print_json, read_image};
use crate::cli::JobCommand;

pub async fn health(client: &ApiClient) -> anyhow::Result<()> {
    let health = client.health().await?;
    println!("{} ({})", health.status, client.config().base_url);
    Ok(())
}

pub async fn upload(client: &ApiClient, file: &Path) -> anyhow::Result<()> {
    let upload = read_image(file).await?;
    print_json(&client.upload_image(&upload).await?)
}

pub async fn colorize(client: &ApiClient, file: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let upload = read_image(file).await?;
    let image = client.colorize_image(&upload).await?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| colorized_path(file));
    tokio::fs::write(&output, &image.png)
        .await
        .with_context(|| format!("cannot write {}", output.display()))?;

    println!("Colorized image saved to {}", output.display());
    Ok(())
}

/// `scene.tif` -> `scene_colorized.png`, next to the input.
fn colorized_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}_colorized.png", stem))
}

pub async fn job(client: &ApiClient, command: JobCommand) -> anyhow::Result<()> {
    match command {
        JobCommand::Create { image_id } => {
            print_job(&client.create_processing_job(&image_id).await?);
        }
        JobCommand::Get { job_id } => {
            print_job(&client.get_processing_job(&job_id).await?);
        }
        JobCommand::Cancel { job_id } => {
            println!("{}", client.cancel_processing_job(&job_id).await?);
        }
        JobCommand::Wait {
            job_id,
            interval,
            max_polls,
        } => {
            let job = client
                .wait_for_job(&job_id, Duration::from_secs(interval), max_polls)
                .await?;
            print_job(&job);
        }
    }
    Ok(())
}

fn print_job(job: &ProcessingJob) {
    print!("job {}: {}", job.id, job.status);
    if !job.message.is_empty() {
        print!(" - {}", job.message);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorized_path() {
        assert_eq!(
            colorized_path(Path::new("data/scene.tif")),
            PathBuf::from("data/scene_colorized.png")
        );
        assert_eq!(
            colorized_path(Path::new("scene")),
            PathBuf::from("scene_colorized.png")
        );
    }
}
