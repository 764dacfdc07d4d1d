// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Rectangular region of interest in source-video pixel space.

use crate::error::ValidationError;
use crate::util::geometry::Point;
use serde::{Deserialize, Serialize};

/// Smallest width/height the selector will commit.
pub const MIN_ROI_SIZE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roi {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Roi {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Axis-aligned rectangle spanning two image-space points, in any
    /// drag direction. Points are rounded to whole pixels first.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (ax, ay) = (round_px(a.x), round_px(a.y));
        let (bx, by) = (round_px(b.x), round_px(b.y));

        Self {
            x: ax.min(bx),
            y: ay.min(by),
            width: ax.abs_diff(bx),
            height: ay.abs_diff(by),
        }
    }

    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    pub fn meets_minimum(&self) -> bool {
        self.width >= MIN_ROI_SIZE && self.height >= MIN_ROI_SIZE
    }

    pub fn fits_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.right() <= frame_width as u64 && self.bottom() <= frame_height as u64
    }

    /// Check both the minimum size and the frame bounds.
    pub fn validate(&self, frame_width: u32, frame_height: u32) -> Result<(), ValidationError> {
        if !self.meets_minimum() {
            return Err(ValidationError::RoiTooSmall { min: MIN_ROI_SIZE });
        }
        if !self.fits_within(frame_width, frame_height) {
            return Err(ValidationError::RoiOutOfBounds);
        }
        Ok(())
    }
}

fn round_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_any_direction() {
        let forward = Roi::from_corners(Point::new(10.0, 20.0), Point::new(60.0, 45.0));
        let backward = Roi::from_corners(Point::new(60.0, 45.0), Point::new(10.0, 20.0));
        let diagonal = Roi::from_corners(Point::new(60.0, 20.0), Point::new(10.0, 45.0));

        let expected = Roi::new(10, 20, 50, 25);
        assert_eq!(forward, expected);
        assert_eq!(backward, expected);
        assert_eq!(diagonal, expected);
    }

    #[test]
    fn test_from_corners_rounds_to_pixels() {
        let roi = Roi::from_corners(Point::new(1.4, 1.6), Point::new(7.5, 9.49));
        assert_eq!(roi, Roi::new(1, 2, 7, 7));
    }

    #[test]
    fn test_validate_minimum_size() {
        assert_eq!(
            Roi::new(0, 0, 4, 100).validate(1920, 1080),
            Err(ValidationError::RoiTooSmall { min: 5 })
        );
        assert!(Roi::new(0, 0, 5, 5).validate(1920, 1080).is_ok());
    }

    #[test]
    fn test_validate_bounds() {
        assert!(Roi::new(1900, 0, 20, 20).validate(1920, 1080).is_ok());
        assert_eq!(
            Roi::new(1901, 0, 20, 20).validate(1920, 1080),
            Err(ValidationError::RoiOutOfBounds)
        );
        assert_eq!(
            Roi::new(0, 1070, 20, 20).validate(1920, 1080),
            Err(ValidationError::RoiOutOfBounds)
        );
    }
}
