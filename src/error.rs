// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types shared by the engine, the API client and persistence.

use thiserror::Error;

/// Boundary validation failures. The message is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload a valid video file ({0})")]
    UnsupportedFileType(String),

    #[error("File size must be less than {max_gb}GB")]
    FileTooLarge { max_gb: u64 },

    #[error("ROI must be at least {min}x{min} pixels")]
    RoiTooSmall { min: u32 },

    #[error("ROI extends beyond frame boundaries")]
    RoiOutOfBounds,

    #[error("No video loaded")]
    NoVideo,

    #[error("Select a region first")]
    NoRoi,
}

/// Main error type for demark operations.
#[derive(Error, Debug)]
pub enum DemarkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (connect, timeout, decode).
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for DemarkError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => DemarkError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => DemarkError::Transport(err.to_string()),
        }
    }
}

/// Result type for demark operations.
pub type Result<T> = std::result::Result<T, DemarkError>;
