// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Settings and job history panel.
//!
//! This module provides the side panel for editing export settings and
//! browsing completed jobs.

use crate::models::{ExportQuality, ExportSettings, ProcessingJob, SettingsPatch};
use crate::util::format::format_timestamp;

/// Result of panel interaction.
pub enum PropertiesAction {
    None,
    UpdateSettings(SettingsPatch),
    SetCollapsed(bool),
}

/// Display the panel. Settings are locked while a job is running.
pub fn show(
    ui: &mut egui::Ui,
    settings: &ExportSettings,
    history: &[ProcessingJob],
    settings_locked: bool,
) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.horizontal(|ui| {
        ui.heading("Settings");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("⏵").on_hover_text("Collapse").clicked() {
                action = PropertiesAction::SetCollapsed(true);
            }
        });
    });
    ui.separator();

    ui.add_enabled_ui(!settings_locked, |ui| {
        egui::Grid::new("export_settings")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Quality:");
                let mut quality = settings.quality;
                egui::ComboBox::from_id_source("quality")
                    .selected_text(quality.label())
                    .show_ui(ui, |ui| {
                        for option in ExportQuality::ALL {
                            ui.selectable_value(&mut quality, option, option.label());
                        }
                    });
                if quality != settings.quality {
                    action = PropertiesAction::UpdateSettings(SettingsPatch {
                        quality: Some(quality),
                        ..Default::default()
                    });
                }
                ui.end_row();

                ui.label("Batch size:");
                let mut batch_size = settings.batch_size;
                if ui
                    .add(egui::DragValue::new(&mut batch_size).clamp_range(1..=64))
                    .changed()
                {
                    action = PropertiesAction::UpdateSettings(SettingsPatch {
                        batch_size: Some(batch_size),
                        ..Default::default()
                    });
                }
                ui.end_row();

                ui.label("I/O workers:");
                let mut io_workers = settings.io_workers;
                if ui
                    .add(egui::DragValue::new(&mut io_workers).clamp_range(1..=32))
                    .changed()
                {
                    action = PropertiesAction::UpdateSettings(SettingsPatch {
                        io_workers: Some(io_workers),
                        ..Default::default()
                    });
                }
                ui.end_row();
            });
    });

    ui.add_space(12.0);
    ui.heading("History");
    ui.separator();

    if history.is_empty() {
        ui.label(egui::RichText::new("No completed jobs yet").italics().weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for job in history {
            ui.group(|ui| {
                ui.label(egui::RichText::new(&job.video_name).strong());
                if let Some(completed) = job.completed_at {
                    ui.label(egui::RichText::new(format_timestamp(completed)).small().weak());
                }
                ui.label(
                    egui::RichText::new(format!("{} quality, ROI {}x{}", job.settings.quality.label(), job.roi.width, job.roi.height))
                        .small(),
                );
                if let Some(url) = &job.output_url {
                    ui.hyperlink_to(egui::RichText::new("Output").small(), url);
                }
            });
        }
    });

    action
}
