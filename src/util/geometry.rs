// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate transformations between screen
//! space (pointer positions), the displayed element's rectangle, and the
//! pixel space of the source image the element shows.

use serde::{Deserialize, Serialize};

/// A 2D point. Which space it lives in depends on where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of an image or element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f64, height as f64)
    }

    /// True when either side is zero, negative or not a number.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Screen-space rectangle an image is currently displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRect {
    pub origin: Point,
    pub size: Size,
}

impl DisplayRect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x <= self.origin.x + self.size.width
            && point.y <= self.origin.y + self.size.height
    }
}

impl From<egui::Pos2> for Point {
    fn from(pos: egui::Pos2) -> Self {
        Point::new(pos.x as f64, pos.y as f64)
    }
}

impl From<egui::Rect> for DisplayRect {
    fn from(rect: egui::Rect) -> Self {
        DisplayRect::new(
            rect.min.into(),
            Size::new(rect.width() as f64, rect.height() as f64),
        )
    }
}

impl From<DisplayRect> for egui::Rect {
    fn from(rect: DisplayRect) -> Self {
        egui::Rect::from_min_size(
            egui::pos2(rect.origin.x as f32, rect.origin.y as f32),
            egui::vec2(rect.size.width as f32, rect.size.height as f32),
        )
    }
}

/// Map a screen point into the source image's pixel space.
///
/// The result is clamped to `[0, source]` on each axis. A zero-sized
/// element (frame still loading) yields the origin.
pub fn to_image_space(screen: Point, element: DisplayRect, source: Size) -> Point {
    if element.size.is_degenerate() || source.is_degenerate() {
        return Point::ORIGIN;
    }

    let scale_x = source.width / element.size.width;
    let scale_y = source.height / element.size.height;

    let x = (screen.x - element.origin.x) * scale_x;
    let y = (screen.y - element.origin.y) * scale_y;

    Point::new(x.clamp(0.0, source.width), y.clamp(0.0, source.height))
}

/// Map a source-image point back to screen space. Inverse of
/// [`to_image_space`] for points inside the element.
pub fn to_screen_space(image: Point, element: DisplayRect, source: Size) -> Point {
    if source.is_degenerate() {
        return element.origin;
    }

    Point::new(
        element.origin.x + image.x * element.size.width / source.width,
        element.origin.y + image.y * element.size.height / source.height,
    )
}

/// Largest rectangle with the source's aspect ratio that fits inside
/// `available`, centered in it.
pub fn fit_centered(available: DisplayRect, source: Size) -> DisplayRect {
    if available.size.is_degenerate() || source.is_degenerate() {
        return DisplayRect::new(available.origin, Size::default());
    }

    let img_aspect = source.width / source.height;
    let available_aspect = available.size.width / available.size.height;

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        let width = available.size.width;
        (width, width / img_aspect)
    } else {
        // Image is taller - fit to height
        let height = available.size.height;
        (height * img_aspect, height)
    };

    let x_offset = (available.size.width - display_width) / 2.0;
    let y_offset = (available.size.height - display_height) / 2.0;

    DisplayRect::new(
        Point::new(available.origin.x + x_offset, available.origin.y + y_offset),
        Size::new(display_width, display_height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> DisplayRect {
        DisplayRect::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_to_image_space_scales_by_display_ratio() {
        // 1920x1080 frame shown at half size, offset by (100, 50)
        let element = rect(100.0, 50.0, 960.0, 540.0);
        let source = Size::new(1920.0, 1080.0);

        let p = to_image_space(Point::new(580.0, 320.0), element, source);
        assert!((p.x - 960.0).abs() < 0.0001);
        assert!((p.y - 540.0).abs() < 0.0001);
    }

    #[test]
    fn test_to_image_space_clamps_to_frame() {
        let element = rect(0.0, 0.0, 100.0, 100.0);
        let source = Size::new(200.0, 400.0);

        let before = to_image_space(Point::new(-30.0, -1.0), element, source);
        assert_eq!(before, Point::new(0.0, 0.0));

        let after = to_image_space(Point::new(150.0, 101.0), element, source);
        assert_eq!(after, Point::new(200.0, 400.0));
    }

    #[test]
    fn test_to_image_space_zero_sized_element() {
        let element = rect(10.0, 10.0, 0.0, 0.0);
        let p = to_image_space(Point::new(15.0, 15.0), element, Size::new(640.0, 480.0));
        assert_eq!(p, Point::ORIGIN);
    }

    #[test]
    fn test_screen_image_roundtrip() {
        let element = rect(20.0, 30.0, 640.0, 360.0);
        let source = Size::new(1280.0, 720.0);
        let screen = Point::new(345.5, 210.25);

        let image = to_image_space(screen, element, source);
        let back = to_screen_space(image, element, source);

        assert!((back.x - screen.x).abs() < 0.0001);
        assert!((back.y - screen.y).abs() < 0.0001);
    }

    #[test]
    fn test_fit_centered_letterboxes_wide_image() {
        let available = rect(0.0, 0.0, 800.0, 800.0);
        let fitted = fit_centered(available, Size::new(1600.0, 900.0));

        assert_eq!(fitted.size.width, 800.0);
        assert_eq!(fitted.size.height, 450.0);
        assert_eq!(fitted.origin.y, 175.0);
    }
}
