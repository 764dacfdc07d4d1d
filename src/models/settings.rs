// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export settings sent with every processing job.

use serde::{Deserialize, Serialize};

/// Output quality preset understood by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportQuality {
    Draft,
    Standard,
    #[default]
    High,
    Lossless,
}

impl ExportQuality {
    pub const ALL: [ExportQuality; 4] = [
        ExportQuality::Draft,
        ExportQuality::Standard,
        ExportQuality::High,
        ExportQuality::Lossless,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExportQuality::Draft => "Draft",
            ExportQuality::Standard => "Standard",
            ExportQuality::High => "High",
            ExportQuality::Lossless => "Lossless",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    pub quality: ExportQuality,
    /// Frames per inpainting batch.
    pub batch_size: u32,
    /// Parallel frame readers/writers on the server.
    pub io_workers: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            quality: ExportQuality::High,
            batch_size: 8,
            io_workers: 4,
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub quality: Option<ExportQuality>,
    pub batch_size: Option<u32>,
    pub io_workers: Option<u32>,
}

impl ExportSettings {
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(quality) = patch.quality {
            self.quality = quality;
        }
        if let Some(batch_size) = patch.batch_size {
            self.batch_size = batch_size.max(1);
        }
        if let Some(io_workers) = patch.io_workers {
            self.io_workers = io_workers.max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ExportSettings::default();
        assert_eq!(settings.quality, ExportQuality::High);
        assert_eq!(settings.batch_size, 8);
        assert_eq!(settings.io_workers, 4);
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let mut settings = ExportSettings::default();
        settings.apply(SettingsPatch {
            quality: Some(ExportQuality::Lossless),
            ..Default::default()
        });

        assert_eq!(settings.quality, ExportQuality::Lossless);
        assert_eq!(settings.batch_size, 8);
        assert_eq!(settings.io_workers, 4);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&ExportSettings::default()).unwrap();
        assert_eq!(json, r#"{"quality":"high","batchSize":8,"ioWorkers":4}"#);
    }
}
