// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame canvas for region selection.
//!
//! This module draws the current video frame fitted into the available
//! space and reports drag gestures over it. The selection rectangle is
//! drawn from the candidate ROI in frame pixels.

use crate::models::Roi;
use crate::util::geometry::{self, DisplayRect, Point, Size};

/// Result of canvas interaction. Positions are in screen space, paired with
/// the rectangle the frame was drawn in that frame.
pub enum CanvasAction {
    None,
    PointerDown(Point, DisplayRect),
    PointerMove(Point, DisplayRect),
    PointerUp,
}

const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 65);

/// Display the frame and handle drag interactions.
pub fn show(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    frame_size: (u32, u32),
    candidate: Option<Roi>,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(20);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let Some(texture) = texture else {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        };

        let source = Size::from_pixels(frame_size.0, frame_size.1);
        let element = geometry::fit_centered(ui.max_rect().into(), source);
        let image_rect: egui::Rect = element.into();

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let response = ui
            .allocate_rect(image_rect, egui::Sense::drag())
            .on_hover_cursor(egui::CursorIcon::Crosshair);

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                action = CanvasAction::PointerDown(pos.into(), element);
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                action = CanvasAction::PointerMove(pos.into(), element);
            }
        } else if response.drag_stopped() {
            action = CanvasAction::PointerUp;
        }

        if let Some(roi) = candidate {
            draw_selection(ui.painter(), roi, element, source);
        }
    });

    action
}

/// Outline the ROI and label it with its frame-pixel size.
fn draw_selection(painter: &egui::Painter, roi: Roi, element: DisplayRect, source: Size) {
    let min = geometry::to_screen_space(Point::new(roi.x as f64, roi.y as f64), element, source);
    let max = geometry::to_screen_space(
        Point::new(roi.right() as f64, roi.bottom() as f64),
        element,
        source,
    );
    let rect = egui::Rect::from_min_max(
        egui::pos2(min.x as f32, min.y as f32),
        egui::pos2(max.x as f32, max.y as f32),
    );

    painter.rect_filled(rect, 0.0, SELECTION_COLOR.gamma_multiply(0.15));
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, SELECTION_COLOR));
    painter.text(
        rect.left_top() - egui::vec2(0.0, 4.0),
        egui::Align2::LEFT_BOTTOM,
        format!("{} x {}", roi.width, roi.height),
        egui::FontId::monospace(12.0),
        SELECTION_COLOR,
    );
}
