// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mask editor toolbar.
//!
//! Brush size sliders, the bulk fill/clear operations and the buttons that
//! leave the editor.

use crate::engine::brush::{BrushSize, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};

pub enum ToolbarAction {
    None,
    FillAll,
    ClearAll,
    Back,
    Confirm,
}

/// Display the toolbar. Brush size edits are applied in place.
pub fn show(ui: &mut egui::Ui, brush_size: &mut BrushSize, marked: usize) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("⬅ Back").clicked() {
            action = ToolbarAction::Back;
        }

        ui.separator();

        let mut width = brush_size.width();
        if ui
            .add(egui::Slider::new(&mut width, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).text("Width"))
            .changed()
        {
            brush_size.set_width(width);
        }

        let mut height = brush_size.height();
        if ui
            .add(egui::Slider::new(&mut height, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).text("Height"))
            .changed()
        {
            brush_size.set_height(height);
        }

        ui.separator();

        if ui.button("Fill All").clicked() {
            action = ToolbarAction::FillAll;
        }
        if ui.button("Clear All").clicked() {
            action = ToolbarAction::ClearAll;
        }

        ui.separator();

        ui.label(egui::RichText::new("LMB = Paint, RMB = Erase").italics().weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(marked > 0, egui::Button::new("✔ Start Processing"))
                .on_disabled_hover_text("Paint the area to remove first")
                .clicked()
            {
                action = ToolbarAction::Confirm;
            }
            ui.label(format!("{} px marked", marked));
        });
    });

    action
}
