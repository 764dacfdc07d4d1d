// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Upload validation, applied before anything touches the network.

use crate::error::ValidationError;
use std::path::Path;

/// Largest accepted upload (2 GiB).
pub const MAX_VIDEO_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Accepted extensions with the MIME type sent on upload.
pub const VIDEO_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
];

/// Extensions for the native file picker filter.
pub fn video_extensions() -> Vec<&'static str> {
    VIDEO_TYPES.iter().map(|(ext, _)| *ext).collect()
}

/// MIME type for a supported video path.
pub fn video_mime_type(path: &Path) -> Result<&'static str, ValidationError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    VIDEO_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .ok_or_else(|| {
            let names: Vec<String> = VIDEO_TYPES
                .iter()
                .map(|(ext, _)| display_name(ext))
                .collect();
            ValidationError::UnsupportedFileType(names.join(", "))
        })
}

pub fn validate_video_size(size: u64) -> Result<(), ValidationError> {
    if size > MAX_VIDEO_BYTES {
        return Err(ValidationError::FileTooLarge {
            max_gb: MAX_VIDEO_BYTES / (1024 * 1024 * 1024),
        });
    }
    Ok(())
}

/// Type first, then size. Returns the MIME type to upload with.
pub fn validate_video_file(path: &Path, size: u64) -> Result<&'static str, ValidationError> {
    let mime = video_mime_type(path)?;
    validate_video_size(size)?;
    Ok(mime)
}

fn display_name(ext: &str) -> String {
    match ext {
        "webm" => "WebM".to_string(),
        other => other.to_ascii_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_types_case_insensitively() {
        assert_eq!(video_mime_type(Path::new("a/clip.MP4")), Ok("video/mp4"));
        assert_eq!(video_mime_type(Path::new("clip.mov")), Ok("video/quicktime"));
        assert_eq!(video_mime_type(Path::new("clip.avi")), Ok("video/x-msvideo"));
    }

    #[test]
    fn test_rejects_unknown_type_with_message() {
        let err = video_mime_type(Path::new("notes.txt")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please upload a valid video file (MP4, WebM, MOV, AVI)"
        );
        assert!(video_mime_type(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_size_limit() {
        assert!(validate_video_size(MAX_VIDEO_BYTES).is_ok());
        let err = validate_video_size(MAX_VIDEO_BYTES + 1).unwrap_err();
        assert_eq!(err.to_string(), "File size must be less than 2GB");
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = validate_video_file(Path::new("big.txt"), MAX_VIDEO_BYTES * 2).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedFileType(_)));
    }
}
