// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mask canvas: the pixel source of truth for what gets removed.
//!
//! Owns two rasters for one (frame, ROI) pair: the base image cut out of
//! the frame, and the binary mask at the same resolution. The display
//! surface is recomputed from both after every mask mutation; the colored
//! overlay is never kept between renders.

use super::brush::MaskSink;
use crate::error::{DemarkError, Result, ValidationError};
use crate::models::{MaskData, Roi};
use base64::Engine as _;
use image::{imageops, GrayImage, ImageEncoder, Luma, Rgba, RgbaImage};

/// Mask value for "remove this pixel".
pub const MASK_ON: u8 = 255;
/// Mask value for "keep this pixel".
pub const MASK_OFF: u8 = 0;
/// Mask intensities above this are drawn with the overlay color.
pub const OVERLAY_THRESHOLD: u8 = 127;
/// Translucent accent used for marked pixels.
pub const OVERLAY_COLOR: Rgba<u8> = Rgba([0, 255, 65, 100]);

/// Binary removal mask, one byte per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBuffer {
    pixels: GrayImage,
}

impl MaskBuffer {
    /// All-off mask of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: GrayImage::from_pixel(width, height, Luma([MASK_OFF])),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width() && y < self.height() {
            Some(self.pixels.get_pixel(x, y).0[0])
        } else {
            None
        }
    }

    pub fn is_marked(&self, x: u32, y: u32) -> bool {
        self.get(x, y).is_some_and(|v| v > OVERLAY_THRESHOLD)
    }

    pub fn marked_count(&self) -> usize {
        self.pixels.as_raw().iter().filter(|v| **v > OVERLAY_THRESHOLD).count()
    }

    /// Fill a rectangle whose top-left may lie outside the buffer; the
    /// part outside is clipped.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, value: u8) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width as i64).min(self.width() as i64);
        let y1 = (y + height as i64).min(self.height() as i64);

        for py in y0..y1 {
            for px in x0..x1 {
                self.pixels.put_pixel(px as u32, py as u32, Luma([value]));
            }
        }
    }

    pub fn fill(&mut self, value: u8) {
        let raw: &mut [u8] = &mut self.pixels;
        raw.fill(value);
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.pixels
    }

    /// Lossless PNG of the mask.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        image::codecs::png::PngEncoder::new(&mut bytes).write_image(
            self.pixels.as_raw(),
            self.width(),
            self.height(),
            image::ExtendedColorType::L8,
        )?;
        Ok(bytes)
    }
}

/// Base image, mask and composited display surface for one ROI.
pub struct MaskCanvas {
    roi: Roi,
    base: RgbaImage,
    mask: MaskBuffer,
    display: RgbaImage,
    revision: u64,
}

impl MaskCanvas {
    /// Cut the ROI out of `frame` and start with an all-off mask.
    pub fn new(frame: &RgbaImage, roi: Roi) -> Result<Self> {
        if roi.width == 0 || roi.height == 0 || !roi.fits_within(frame.width(), frame.height()) {
            return Err(DemarkError::Validation(ValidationError::RoiOutOfBounds));
        }

        let base = imageops::crop_imm(frame, roi.x, roi.y, roi.width, roi.height).to_image();
        let mut canvas = Self {
            roi,
            mask: MaskBuffer::new(roi.width, roi.height),
            display: RgbaImage::new(roi.width, roi.height),
            base,
            revision: 0,
        };
        canvas.render_overlay();

        log::debug!("Mask canvas initialised for ROI {:?}", roi);
        Ok(canvas)
    }

    pub fn roi(&self) -> Roi {
        self.roi
    }

    pub fn base(&self) -> &RgbaImage {
        &self.base
    }

    pub fn mask(&self) -> &MaskBuffer {
        &self.mask
    }

    /// Composited surface shown to the user.
    pub fn display(&self) -> &RgbaImage {
        &self.display
    }

    /// Bumped on every render; lets the view skip texture uploads.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Recompute the display surface from the base image and the mask.
    pub fn render_overlay(&mut self) {
        let overlay = build_overlay(&self.mask, OVERLAY_COLOR, OVERLAY_THRESHOLD);

        // The overlay replaces every pixel, alpha included, so nothing from
        // the previous render survives. Base goes underneath what it left
        // see-through.
        let surface: &mut [u8] = &mut self.display;
        surface.copy_from_slice(overlay.as_raw());
        for (dst, src) in self.display.pixels_mut().zip(self.base.pixels()) {
            destination_over(dst, *src);
        }

        self.revision = self.revision.wrapping_add(1);
    }

    /// Encode the mask (not the display surface) for the service.
    pub fn export(&self) -> Result<MaskData> {
        let png = self.mask.encode_png()?;
        Ok(MaskData {
            data_url: format!(
                "data:image/png;base64,{}",
                base64::engine::general_purpose::STANDARD.encode(png)
            ),
            width: self.mask.width(),
            height: self.mask.height(),
        })
    }
}

impl MaskSink for MaskCanvas {
    fn mask_mut(&mut self) -> &mut MaskBuffer {
        &mut self.mask
    }

    fn mask_changed(&mut self) {
        self.render_overlay();
    }
}

/// Accent color where the mask is on, fully transparent elsewhere.
fn build_overlay(mask: &MaskBuffer, color: Rgba<u8>, threshold: u8) -> RgbaImage {
    let mut overlay = RgbaImage::new(mask.width(), mask.height());
    for (src, dst) in mask.as_image().pixels().zip(overlay.pixels_mut()) {
        if src.0[0] > threshold {
            *dst = color;
        }
    }
    overlay
}

/// Porter-Duff "destination over": `src` is painted behind `dst`.
fn destination_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let da = dst.0[3] as f32 / 255.0;
    let sa = src.0[3] as f32 / 255.0;
    let out_a = da + sa * (1.0 - da);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let dc = dst.0[c] as f32 / 255.0;
        let sc = src.0[c] as f32 / 255.0;
        let value = (dc * da + sc * sa * (1.0 - da)) / out_a;
        out[c] = (value * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    *dst = Rgba(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 30, 255]))
    }

    #[test]
    fn test_new_crops_roi_and_starts_unmarked() {
        let canvas = MaskCanvas::new(&frame(64, 48), Roi::new(10, 5, 20, 12)).unwrap();

        assert_eq!(canvas.base().dimensions(), (20, 12));
        assert_eq!(canvas.base().get_pixel(0, 0), &Rgba([10, 5, 30, 255]));
        assert_eq!(canvas.base().get_pixel(19, 11), &Rgba([29, 16, 30, 255]));
        assert_eq!(canvas.mask().marked_count(), 0);
        assert_eq!(canvas.mask().get(3, 3), Some(MASK_OFF));
        // Unmarked display is an undistorted view of the source.
        assert_eq!(canvas.display(), canvas.base());
    }

    #[test]
    fn test_new_rejects_roi_outside_frame() {
        assert!(MaskCanvas::new(&frame(64, 48), Roi::new(50, 0, 20, 10)).is_err());
        assert!(MaskCanvas::new(&frame(64, 48), Roi::new(0, 0, 0, 10)).is_err());
    }

    #[test]
    fn test_overlay_tints_only_marked_pixels() {
        let mut canvas = MaskCanvas::new(&frame(32, 32), Roi::new(10, 20, 8, 8)).unwrap();
        let before = canvas.revision();

        canvas.mask_mut().fill_rect(0, 0, 1, 1, MASK_ON);
        canvas.mask_changed();

        assert!(canvas.revision() > before);
        // Base (10, 20, 30) with the accent at alpha 100 on top.
        let tinted = canvas.display().get_pixel(0, 0).0;
        assert!(tinted[0].abs_diff(6) <= 1);
        assert!(tinted[1].abs_diff(112) <= 1);
        assert!(tinted[2].abs_diff(44) <= 1);
        assert_eq!(tinted[3], 255);

        assert_eq!(canvas.display().get_pixel(1, 0), canvas.base().get_pixel(1, 0));
    }

    #[test]
    fn test_render_replaces_previous_surface() {
        let mut canvas = MaskCanvas::new(&frame(32, 32), Roi::new(4, 4, 6, 6)).unwrap();
        canvas.mask_mut().fill_rect(0, 0, 6, 6, MASK_ON);
        canvas.mask_changed();
        assert_ne!(canvas.display(), canvas.base());

        canvas.mask_mut().fill(MASK_OFF);
        canvas.mask_changed();
        assert_eq!(canvas.display(), canvas.base());

        canvas.mask_mut().fill_rect(2, 2, 1, 1, MASK_ON);
        canvas.mask_changed();
        let once = canvas.display().clone();
        canvas.render_overlay();
        assert_eq!(canvas.display(), &once);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut mask = MaskBuffer::new(2, 1);
        mask.fill_rect(0, 0, 1, 1, OVERLAY_THRESHOLD);
        mask.fill_rect(1, 0, 1, 1, OVERLAY_THRESHOLD + 1);

        let overlay = build_overlay(&mask, OVERLAY_COLOR, OVERLAY_THRESHOLD);
        assert_eq!(overlay.get_pixel(0, 0).0[3], 0);
        assert_eq!(overlay.get_pixel(1, 0), &OVERLAY_COLOR);
    }

    #[test]
    fn test_fill_rect_clips_at_edges() {
        let mut mask = MaskBuffer::new(10, 10);
        mask.fill_rect(-3, -3, 5, 5, MASK_ON);
        assert_eq!(mask.marked_count(), 4);

        mask.fill_rect(8, 8, 50, 50, MASK_ON);
        assert_eq!(mask.marked_count(), 8);

        mask.fill_rect(20, 20, 5, 5, MASK_ON);
        assert_eq!(mask.marked_count(), 8);
    }

    #[test]
    fn test_export_is_idempotent_and_decodes_back() {
        let mut canvas = MaskCanvas::new(&frame(40, 40), Roi::new(0, 0, 16, 9)).unwrap();
        canvas.mask_mut().fill_rect(2, 2, 4, 3, MASK_ON);
        canvas.mask_changed();

        let first = canvas.export().unwrap();
        let second = canvas.export().unwrap();
        assert_eq!(first, second);
        assert_eq!((first.width, first.height), (16, 9));

        let encoded = first.data_url.strip_prefix("data:image/png;base64,").unwrap();
        let png = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(&decoded, canvas.mask().as_image());
    }
}
