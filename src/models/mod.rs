// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: videos, regions, jobs and export settings.

pub mod job;
pub mod roi;
pub mod settings;
pub mod video;

pub use job::{MaskData, ProcessingJob, ProcessingProgress, ProcessingStage};
pub use roi::Roi;
pub use settings::{ExportQuality, ExportSettings, SettingsPatch};
pub use video::{VideoFrame, VideoInfo};
