// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Screen shown in place of a view that panicked while rendering.

pub enum RecoveryAction {
    None,
    ResetState,
    Reload,
}

pub fn show(ui: &mut egui::Ui, message: &str) -> RecoveryAction {
    let mut action = RecoveryAction::None;

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.heading(egui::RichText::new("Something went wrong").color(egui::Color32::LIGHT_RED));
        ui.add_space(8.0);
        ui.label(egui::RichText::new(message).monospace().weak());
        ui.add_space(8.0);
        ui.label("Your settings and job history are saved.");
        ui.add_space(20.0);

        ui.horizontal(|ui| {
            if ui.button("Reset state").clicked() {
                action = RecoveryAction::ResetState;
            }
            if ui.button("Reload").clicked() {
                action = RecoveryAction::Reload;
            }
        });
    });

    action
}
