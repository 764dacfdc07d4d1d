// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Contract of the remote processing service.
//!
//! The service uploads and probes videos, extracts preview frames and runs
//! inpainting jobs. Everything the client needs from it goes through
//! [`ProcessingApi`], so the job lifecycle can be driven by a scripted
//! implementation in tests.

use crate::error::Result;
use crate::models::{ExportSettings, ProcessingProgress, ProcessingStage, Roi, VideoInfo};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;

/// A validated local file ready to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoUpload {
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub size: u64,
}

impl VideoUpload {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string())
    }
}

/// Body of the job-start call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartJobRequest {
    pub video_id: String,
    pub roi: Roi,
    pub mask_data_url: String,
    pub settings: ExportSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StartJobResponse {
    pub job_id: String,
}

/// One poll of a job's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    #[serde(default)]
    pub job_id: String,
    pub status: ProcessingStage,
    pub progress: ProcessingProgress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HealthResponse {
    pub status: String,
}

/// Remote processing service.
pub trait ProcessingApi: Send + Sync + 'static {
    /// Upload a video file and get back its probed metadata.
    fn upload_video(&self, upload: &VideoUpload) -> impl Future<Output = Result<VideoInfo>> + Send;

    /// Decoded frame of `video_id` at `time` seconds.
    fn fetch_frame(&self, video_id: &str, time: f64)
        -> impl Future<Output = Result<RgbaImage>> + Send;

    /// Start inpainting; returns the server-assigned job id.
    fn start_job(&self, request: &StartJobRequest) -> impl Future<Output = Result<String>> + Send;

    fn job_status(&self, job_id: &str) -> impl Future<Output = Result<JobStatusResponse>> + Send;

    /// Best-effort stop of server-side work.
    fn cancel_job(&self, job_id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Download URL of a job's output. Depends only on the job id.
    fn output_url(&self, job_id: &str) -> String;

    /// Fetch the job output and write it to `dest`.
    fn download_output(&self, job_id: &str, dest: PathBuf)
        -> impl Future<Output = Result<PathBuf>> + Send;

    /// True when the service reports itself healthy.
    fn health(&self) -> impl Future<Output = Result<bool>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_request_wire_format() {
        let request = StartJobRequest {
            video_id: "v1".into(),
            roi: Roi::new(1, 2, 30, 40),
            mask_data_url: "data:image/png;base64,AAAA".into(),
            settings: ExportSettings::default(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["videoId"], "v1");
        assert_eq!(value["roi"]["width"], 30);
        assert_eq!(value["maskDataUrl"], "data:image/png;base64,AAAA");
        assert_eq!(value["settings"]["batchSize"], 8);
    }

    #[test]
    fn test_status_response_parses_server_payload() {
        let json = r#"{
            "jobId": "j1",
            "status": "complete",
            "progress": {"stage": "complete", "percent": 100, "currentFrame": 90,
                         "totalFrames": 90, "fps": 12.5, "eta": "00:00", "message": "Done"},
            "outputUrl": "/api/process/download/j1"
        }"#;

        let status: JobStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(status.status, ProcessingStage::Complete);
        assert_eq!(status.progress.total_frames, 90);
        assert_eq!(status.output_url.as_deref(), Some("/api/process/download/j1"));
        assert!(status.error.is_none());
    }
}
