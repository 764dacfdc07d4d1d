// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Uploaded video metadata and decoded preview frames.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Metadata returned by the service for an uploaded video.
///
/// Immutable once received; a new upload replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub id: String,
    pub name: String,
    /// Server-side storage path, opaque to the client.
    #[serde(default)]
    pub path: String,
    /// Duration in seconds.
    pub duration: f64,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    /// File size in bytes.
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// A decoded frame of the current video at a given timestamp.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Timestamp in seconds.
    pub time: f64,
    pub image: Arc<RgbaImage>,
}

impl VideoFrame {
    pub fn new(time: f64, image: RgbaImage) -> Self {
        Self {
            time,
            image: Arc::new(image),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl PartialEq for VideoFrame {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && Arc::ptr_eq(&self.image, &other.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_info_wire_format() {
        let json = r#"{
            "id": "abc",
            "name": "clip.mp4",
            "path": "/uploads/abc/video.mp4",
            "duration": 12.5,
            "fps": 29.97,
            "width": 1920,
            "height": 1080,
            "size": 1048576
        }"#;

        let info: VideoInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.id, "abc");
        assert_eq!(info.width, 1920);
        assert_eq!(info.size, 1_048_576);
        assert!(info.thumbnail_url.is_none());
    }
}
