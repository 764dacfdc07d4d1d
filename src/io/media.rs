// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file handling.
//!
//! This module validates local video files before upload, decodes frame
//! images returned by the service, and converts rasters to formats
//! suitable for display in egui.

use crate::api::VideoUpload;
use crate::error::{DemarkError, Result};
use crate::util::validation;
use image::RgbaImage;
use std::path::Path;

/// Check a picked file and describe it for upload. Nothing is read yet.
pub fn prepare_upload(path: &Path) -> Result<VideoUpload> {
    let size = std::fs::metadata(path)?.len();
    let mime_type = validation::validate_video_file(path, size).map_err(DemarkError::from)?;

    Ok(VideoUpload {
        path: path.to_path_buf(),
        mime_type,
        size,
    })
}

/// Decode an encoded frame (JPEG/PNG) into RGBA pixels.
pub fn decode_frame(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Copy an RGBA raster into an egui image.
pub fn to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}
