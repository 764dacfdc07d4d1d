// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Upload view.

use crate::util::format::format_bytes;
use crate::util::validation::{video_extensions, MAX_VIDEO_BYTES};

pub enum UploadAction {
    None,
    Browse,
}

/// Welcome screen with the file picker. `busy` replaces the picker with a
/// spinner while an upload runs.
pub fn show(ui: &mut egui::Ui, busy: Option<&str>) -> UploadAction {
    let mut action = UploadAction::None;

    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(
                egui::RichText::new("DEMARK")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("AI watermark removal")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(30.0);

            if let Some(message) = busy {
                ui.spinner();
                ui.add_space(10.0);
                ui.label(egui::RichText::new(message).size(16.0).color(egui::Color32::from_gray(200)));
                return;
            }

            if ui
                .add(egui::Button::new(egui::RichText::new("Choose Video...").size(18.0)).min_size(egui::vec2(200.0, 40.0)))
                .clicked()
            {
                action = UploadAction::Browse;
            }
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new(format!(
                    "or drop a file here - {} up to {}",
                    video_extensions().join(", ").to_uppercase(),
                    format_bytes(MAX_VIDEO_BYTES)
                ))
                .weak(),
            );
        });
    });

    action
}
