// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Processing job data structures.
//!
//! A job is created locally when the user confirms the mask, renamed to
//! the server-assigned id once the service accepts it, and then only
//! changes through lifecycle events (progress, completion, failure).

use super::{ExportSettings, Roi, VideoInfo};
use serde::{Deserialize, Serialize};

/// Server-side processing stage. A job's `status` mirrors its stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStage {
    #[default]
    Idle,
    Uploading,
    Extracting,
    Inpainting,
    Encoding,
    Complete,
    Error,
}

impl ProcessingStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingStage::Complete | ProcessingStage::Error)
    }

    /// Human-readable label for the processing view.
    pub fn label(&self) -> &'static str {
        match self {
            ProcessingStage::Idle => "Ready",
            ProcessingStage::Uploading => "Uploading...",
            ProcessingStage::Extracting => "Extracting frames...",
            ProcessingStage::Inpainting => "AI Inpainting...",
            ProcessingStage::Encoding => "Encoding video...",
            ProcessingStage::Complete => "Complete!",
            ProcessingStage::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingProgress {
    pub stage: ProcessingStage,
    /// 0 to 100.
    #[serde(default)]
    pub percent: u8,
    #[serde(default)]
    pub current_frame: u64,
    #[serde(default)]
    pub total_frames: u64,
    #[serde(default)]
    pub fps: f64,
    /// Pre-formatted remaining time, `--:--` when unknown.
    #[serde(default = "unknown_eta")]
    pub eta: String,
    #[serde(default)]
    pub message: String,
}

fn unknown_eta() -> String {
    "--:--".to_string()
}

impl ProcessingProgress {
    /// Progress of a job that has not reached the server yet.
    pub fn starting() -> Self {
        Self {
            stage: ProcessingStage::Uploading,
            percent: 0,
            current_frame: 0,
            total_frames: 0,
            fps: 0.0,
            eta: unknown_eta(),
            message: "Starting...".to_string(),
        }
    }
}

/// Encoded removal mask at ROI resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskData {
    /// `data:image/png;base64,...`
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingJob {
    pub id: String,
    pub video_id: String,
    pub video_name: String,
    pub roi: Roi,
    pub mask_data: MaskData,
    pub settings: ExportSettings,
    pub status: ProcessingStage,
    pub progress: ProcessingProgress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unix milliseconds.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl ProcessingJob {
    /// New locally-identified job in `uploading` with zero progress.
    pub fn new_local(
        video: &VideoInfo,
        roi: Roi,
        mask_data: MaskData,
        settings: ExportSettings,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            video_id: video.id.clone(),
            video_name: video.name.clone(),
            roi,
            mask_data,
            settings,
            status: ProcessingStage::Uploading,
            progress: ProcessingProgress::starting(),
            output_url: None,
            error: None,
            created_at: chrono::Utc::now().timestamp_millis(),
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
