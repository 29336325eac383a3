//! Health check, image upload, colorization and processing jobs.

use std::time::Duration;

use serde_json::Value;

use csarnet_core::domain::{ColorizedImage, ImageKind, ImageUpload, ProcessingJob};
use csarnet_core::ports::{FormPart, Method};
use csarnet_core::validation::validate_image;
use csarnet_core::{ClientError, ClientResult};
use csarnet_shared::dto::{ColorizeResponse, CreateJobRequest, HealthResponse};

use super::{ApiClient, RequestOptions, decode, decode_value, ensure_success};

impl ApiClient {
    /// `GET /health/`, unauthenticated.
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let response = self.request_public("/health/", RequestOptions::get()).await?;
        if !response.is_success() {
            return Err(ClientError::api(
                response.status,
                format!("Health check failed: HTTP {}", response.status),
            ));
        }
        decode(&response)
    }

    /// Upload a SAR image to `/images/` and return the created record.
    pub async fn upload_image(&self, upload: &ImageUpload) -> ClientResult<Value> {
        let response = self
            .request("/images/", image_form(upload, ImageKind::SarImage)?)
            .await?;
        let response = ensure_success(response, &["detail"], "Upload failed")?;

        tracing::info!(file = %upload.file_name, bytes = upload.len(), "Image uploaded");
        decode_value(&response)
    }

    /// Run the colorization model on a SAR image via `/predict/`.
    pub async fn colorize_image(&self, upload: &ImageUpload) -> ClientResult<ColorizedImage> {
        let response = self
            .request("/predict/", image_form(upload, ImageKind::SarImage)?)
            .await?;
        let response = ensure_success(response, &["error"], "Colorization failed")?;

        let body: ColorizeResponse = decode(&response)?;
        let image = ColorizedImage::from_base64(&body.colorized_image)?;
        tracing::info!(file = %upload.file_name, png_bytes = image.png.len(), "Image colorized");
        Ok(image)
    }

    pub async fn create_processing_job(&self, image_id: &str) -> ClientResult<ProcessingJob> {
        let body = CreateJobRequest::colorization(image_id);
        let response = self
            .request("/processing-jobs/", RequestOptions::json(Method::POST, &body)?)
            .await?;
        let response = ensure_success(response, &["detail"], "Failed to create processing job")?;

        let job: ProcessingJob = decode(&response)?;
        tracing::info!(job_id = %job.id, image_id, "Processing job created");
        Ok(job)
    }

    pub async fn get_processing_job(&self, job_id: &str) -> ClientResult<ProcessingJob> {
        let endpoint = format!("/processing-jobs/{}/", job_id);
        let response = self.request(&endpoint, RequestOptions::get()).await?;
        let response = ensure_success(response, &[], "Failed to get job status")?;
        decode(&response)
    }

    /// Cancel a pending job. Returns the backend's status message.
    pub async fn cancel_processing_job(&self, job_id: &str) -> ClientResult<String> {
        let endpoint = format!("/processing-jobs/{}/cancel/", job_id);
        let response = self.request(&endpoint, RequestOptions::post()).await?;
        let response = ensure_success(response, &["error", "detail"], "Failed to cancel job")?;

        let body = decode_value(&response)?;
        let status = body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("Job cancelled")
            .to_string();
        tracing::info!(job_id, "Processing job cancelled");
        Ok(status)
    }

    /// Poll a job every `interval` until it completes or fails.
    ///
    /// Gives up with [`ClientError::JobTimeout`] after `max_polls` polls.
    pub async fn wait_for_job(
        &self,
        job_id: &str,
        interval: Duration,
        max_polls: u32,
    ) -> ClientResult<ProcessingJob> {
        for poll in 1..=max_polls {
            let job = self.get_processing_job(job_id).await?;
            tracing::debug!(job_id, poll, status = %job.status, "Polled processing job");
            if job.status.is_terminal() {
                return Ok(job);
            }
            if poll < max_polls {
                tokio::time::sleep(interval).await;
            }
        }

        Err(ClientError::JobTimeout {
            job_id: job_id.to_string(),
            polls: max_polls,
        })
    }
}

/// Validate `upload` for `kind` and wrap it in a single-file multipart form.
fn image_form(upload: &ImageUpload, kind: ImageKind) -> ClientResult<RequestOptions> {
    validate_image(upload, kind)?;
    let part = FormPart::file(
        kind.form_field(),
        upload.file_name.as_str(),
        upload.mime_type.as_str(),
        upload.bytes.clone(),
    );
    Ok(RequestOptions::multipart(Method::POST, vec![part]))
}
