// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Rectangular paint/erase brush for the removal mask.
//!
//! The brush only mutates the mask. After every mutation it calls
//! [`MaskSink::mask_changed`] so the owner can re-render; it never draws
//! the display surface itself.
//!
//! Each pointer event stamps once at the pointer position. Samples are not
//! interpolated, so a fast stroke can leave gaps between stamps.

use super::mask_canvas::{MaskBuffer, MASK_OFF, MASK_ON};
use crate::util::geometry::{DisplayRect, Point, Size};

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 256;
pub const DEFAULT_BRUSH_SIZE: u32 = 64;

/// Something that owns a mask and wants to know when it changed.
pub trait MaskSink {
    fn mask_mut(&mut self) -> &mut MaskBuffer;

    /// Called synchronously after every brush mutation.
    fn mask_changed(&mut self);
}

/// Brush dimensions in display pixels, whatever the ROI resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSize {
    width: u32,
    height: u32,
}

impl BrushSize {
    /// Both sides are clamped to `[1, 256]`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: clamp_side(width),
            height: clamp_side(height),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = clamp_side(width);
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = clamp_side(height);
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH_SIZE, DEFAULT_BRUSH_SIZE)
    }
}

fn clamp_side(v: u32) -> u32 {
    v.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintMode {
    /// Mark pixels for removal (white).
    #[default]
    Draw,
    /// Clear marked pixels (black).
    Erase,
}

impl PaintMode {
    pub fn mask_value(&self) -> u8 {
        match self {
            PaintMode::Draw => MASK_ON,
            PaintMode::Erase => MASK_OFF,
        }
    }
}

/// Which pointer button started a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Secondary button erases, anything else draws.
    pub fn paint_mode(&self) -> PaintMode {
        match self {
            PointerButton::Secondary => PaintMode::Erase,
            PointerButton::Primary | PointerButton::Middle => PaintMode::Draw,
        }
    }
}

impl From<egui::PointerButton> for PointerButton {
    fn from(button: egui::PointerButton) -> Self {
        match button {
            egui::PointerButton::Secondary => PointerButton::Secondary,
            egui::PointerButton::Middle => PointerButton::Middle,
            _ => PointerButton::Primary,
        }
    }
}

/// Stroke state of the mask brush.
#[derive(Debug, Clone)]
pub struct BrushEngine {
    /// Size on screen, in display pixels.
    pub size: BrushSize,
    /// Surface pixels per display pixel on each axis.
    surface_scale: (f64, f64),
    mode: PaintMode,
    is_painting: bool,
    last_position: Option<Point>,
}

impl Default for BrushEngine {
    fn default() -> Self {
        Self {
            size: BrushSize::default(),
            surface_scale: (1.0, 1.0),
            mode: PaintMode::default(),
            is_painting: false,
            last_position: None,
        }
    }
}

impl BrushEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how the surface of `source` pixels is shown in `element`.
    /// Ignored while either is empty.
    pub fn set_display(&mut self, element: DisplayRect, source: Size) {
        if element.size.is_degenerate() || source.is_degenerate() {
            return;
        }
        self.surface_scale = (
            source.width / element.size.width,
            source.height / element.size.height,
        );
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    pub fn is_painting(&self) -> bool {
        self.is_painting
    }

    /// Last pointer position over the surface, used for the cursor preview.
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    /// Start a stroke and stamp immediately.
    pub fn pointer_down<S: MaskSink>(&mut self, sink: &mut S, position: Point, button: PointerButton) {
        self.mode = button.paint_mode();
        self.is_painting = true;
        self.last_position = Some(position);
        self.stamp(sink, position, self.mode);
    }

    /// Track the pointer; stamps only while a stroke is active.
    pub fn pointer_move<S: MaskSink>(&mut self, sink: &mut S, position: Point) {
        self.last_position = Some(position);
        if self.is_painting {
            self.stamp(sink, position, self.mode);
        }
    }

    pub fn pointer_up(&mut self) {
        self.is_painting = false;
    }

    /// Pointer left the surface: ends the stroke and hides the preview.
    pub fn pointer_left(&mut self) {
        self.is_painting = false;
        self.last_position = None;
    }

    /// Top-left and size, in surface pixels, of the stamp centered on
    /// `position`. Never smaller than one pixel.
    pub fn stamp_rect(&self, position: Point) -> (i64, i64, u32, u32) {
        let (scale_x, scale_y) = self.surface_scale;
        let w = ((self.size.width() as f64 * scale_x).round() as u32).max(1);
        let h = ((self.size.height() as f64 * scale_y).round() as u32).max(1);
        let x = (position.x - w as f64 / 2.0).floor() as i64;
        let y = (position.y - h as f64 / 2.0).floor() as i64;
        (x, y, w, h)
    }

    /// One filled rectangle in the color for `mode`.
    pub fn stamp<S: MaskSink>(&self, sink: &mut S, position: Point, mode: PaintMode) {
        let (x, y, w, h) = self.stamp_rect(position);
        sink.mask_mut().fill_rect(x, y, w, h, mode.mask_value());
        sink.mask_changed();
    }

    /// Mark the whole mask in one step.
    pub fn fill_mask<S: MaskSink>(&self, sink: &mut S) {
        sink.mask_mut().fill(MASK_ON);
        sink.mask_changed();
    }

    /// Clear the whole mask in one step.
    pub fn clear_mask<S: MaskSink>(&self, sink: &mut S) {
        sink.mask_mut().fill(MASK_OFF);
        sink.mask_changed();
    }
}
