// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Paint surface for the mask editor.
//!
//! Shows the composited mask display fitted into the available space and
//! turns raw pointer input into surface-pixel events for the brush. The
//! brush outline follows the pointer at its on-screen size.

use crate::engine::brush::{BrushSize, PointerButton};
use crate::util::geometry::{self, DisplayRect, Point, Size};

/// Pointer input over the surface, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    Down(Point, PointerButton),
    Move(Point),
    Up,
    Left,
}

const CURSOR_COLOR: egui::Color32 = egui::Color32::from_rgb(34, 211, 238);

/// Display the surface. Returns the pointer events and the rectangle the
/// surface was drawn in.
pub fn show(
    ui: &mut egui::Ui,
    texture: &egui::TextureHandle,
    surface_size: (u32, u32),
    brush_size: BrushSize,
    last_position: Option<Point>,
) -> (Vec<SurfaceEvent>, DisplayRect) {
    let mut events = Vec::new();
    let mut shown = DisplayRect::default();
    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let source = Size::from_pixels(surface_size.0, surface_size.1);
        let element = geometry::fit_centered(ui.max_rect().into(), source);
        let image_rect: egui::Rect = element.into();
        shown = element;

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        ui.allocate_rect(image_rect, egui::Sense::click_and_drag())
            .on_hover_cursor(egui::CursorIcon::Crosshair);

        let (pointer, pressed, released, moved) = ui.input(|i| {
            let pressed = [
                egui::PointerButton::Primary,
                egui::PointerButton::Secondary,
                egui::PointerButton::Middle,
            ]
            .into_iter()
            .find(|b| i.pointer.button_pressed(*b));
            (
                i.pointer.hover_pos(),
                pressed,
                i.pointer.any_released(),
                i.pointer.delta() != egui::Vec2::ZERO,
            )
        });

        match pointer.filter(|pos| image_rect.contains(*pos)) {
            Some(pos) => {
                let at = geometry::to_image_space(pos.into(), element, source);
                if let Some(button) = pressed {
                    events.push(SurfaceEvent::Down(at, button.into()));
                } else if moved || last_position.is_none() {
                    events.push(SurfaceEvent::Move(at));
                }
            }
            None if last_position.is_some() => events.push(SurfaceEvent::Left),
            None => {}
        }
        if released {
            events.push(SurfaceEvent::Up);
        }

        if let Some(at) = last_position {
            draw_brush_outline(ui.painter(), at, brush_size, element, source);
        }
    });

    (events, shown)
}

fn draw_brush_outline(painter: &egui::Painter, at: Point, size: BrushSize, element: DisplayRect, source: Size) {
    let center = geometry::to_screen_space(at, element, source);
    let rect = egui::Rect::from_center_size(
        egui::pos2(center.x as f32, center.y as f32),
        egui::vec2(size.width() as f32, size.height() as f32),
    );

    painter.with_clip_rect(element.into()).rect_stroke(rect, 0.0, egui::Stroke::new(1.5, CURSOR_COLOR));
}
