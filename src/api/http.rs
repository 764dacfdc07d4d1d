// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! HTTP/JSON implementation of [`ProcessingApi`].

use super::client::{
    HealthResponse, JobStatusResponse, ProcessingApi, StartJobRequest, StartJobResponse, VideoUpload,
};
use crate::config::AppConfig;
use crate::error::{DemarkError, Result};
use crate::io::media;
use crate::models::VideoInfo;
use image::RgbaImage;
use std::path::PathBuf;
use std::time::Duration;

pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    upload_timeout: Duration,
}

impl HttpApi {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            upload_timeout: config.upload_timeout(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

/// Turn a non-success response into [`DemarkError::Api`] with the body text.
async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        body
    };
    Err(DemarkError::Api {
        status: status.as_u16(),
        message,
    })
}

impl ProcessingApi for HttpApi {
    async fn upload_video(&self, upload: &VideoUpload) -> Result<VideoInfo> {
        let bytes = tokio::fs::read(&upload.path).await?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(upload.file_name())
            .mime_str(upload.mime_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        log::info!("Uploading {} ({} bytes)", upload.path.display(), upload.size);
        let response = self
            .client
            .post(self.url("/upload"))
            .timeout(self.upload_timeout)
            .multipart(form)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    async fn fetch_frame(&self, video_id: &str, time: f64) -> Result<RgbaImage> {
        let response = self
            .client
            .get(self.url(&format!("/frame/{}", video_id)))
            .query(&[("time", time)])
            .send()
            .await?;

        let bytes = check(response).await?.bytes().await?;
        media::decode_frame(&bytes)
    }

    async fn start_job(&self, request: &StartJobRequest) -> Result<String> {
        let response = self
            .client
            .post(self.url("/process/start"))
            .json(request)
            .send()
            .await?;

        let started: StartJobResponse = check(response).await?.json().await?;
        Ok(started.job_id)
    }

    async fn job_status(&self, job_id: &str) -> Result<JobStatusResponse> {
        let response = self
            .client
            .get(self.url(&format!("/process/status/{}", job_id)))
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    async fn cancel_job(&self, job_id: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url(&format!("/process/cancel/{}", job_id)))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    fn output_url(&self, job_id: &str) -> String {
        self.url(&format!("/process/download/{}", job_id))
    }

    async fn download_output(&self, job_id: &str, dest: PathBuf) -> Result<PathBuf> {
        let response = self
            .client
            .get(self.output_url(job_id))
            .timeout(self.upload_timeout)
            .send()
            .await?;

        let bytes = check(response).await?.bytes().await?;
        tokio::fs::write(&dest, &bytes).await?;
        log::info!("Saved output of job {} to {}", job_id, dest.display());
        Ok(dest)
    }

    async fn health(&self) -> Result<bool> {
        let response = self.client.get(self.url("/health")).send().await?;
        let health: HealthResponse = check(response).await?.json().await?;
        Ok(health.status == "ok" || health.status == "healthy")
    }
}
