// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Processing and completion view.
//!
//! Renders the current job whatever its state: running with live progress,
//! failed with the server message, or complete with the download button.

use crate::models::{ProcessingJob, ProcessingStage};

pub enum ProcessingAction {
    None,
    Cancel,
    Retry,
    StartOver,
    Download,
}

pub fn show(ui: &mut egui::Ui, job: &ProcessingJob, downloading: bool) -> ProcessingAction {
    let mut action = ProcessingAction::None;
    let progress = &job.progress;

    ui.vertical_centered(|ui| {
        ui.set_max_width(480.0);
        ui.add_space(40.0);

        match job.status {
            ProcessingStage::Complete => {
                ui.heading(egui::RichText::new("✔ Complete!").color(egui::Color32::from_rgb(0, 255, 65)));
                ui.label(egui::RichText::new(&job.video_name).weak());
            }
            ProcessingStage::Error => {
                ui.heading(egui::RichText::new("✖ Processing failed").color(egui::Color32::LIGHT_RED));
                ui.label(job.error.as_deref().unwrap_or(progress.message.as_str()));
            }
            stage => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.heading(stage.label());
                });
                ui.label(egui::RichText::new(&progress.message).weak());
            }
        }

        ui.add_space(20.0);
        ui.add(
            egui::ProgressBar::new(progress.percent.min(100) as f32 / 100.0)
                .show_percentage()
                .animate(!job.is_terminal()),
        );
        ui.add_space(12.0);

        egui::Grid::new("job_stats")
            .num_columns(3)
            .spacing([32.0, 4.0])
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Frames").small().weak());
                ui.label(egui::RichText::new("FPS").small().weak());
                ui.label(egui::RichText::new("ETA").small().weak());
                ui.end_row();

                ui.label(format!("{} / {}", progress.current_frame, progress.total_frames));
                ui.label(format!("{:.1}", progress.fps));
                ui.label(&progress.eta);
                ui.end_row();
            });

        ui.add_space(24.0);
        ui.horizontal(|ui| match job.status {
            ProcessingStage::Complete => {
                let label = if downloading { "Saving..." } else { "⬇ Download" };
                if ui.add_enabled(!downloading, egui::Button::new(label)).clicked() {
                    action = ProcessingAction::Download;
                }
                if ui.button("⟲ Start Over").clicked() {
                    action = ProcessingAction::StartOver;
                }
            }
            ProcessingStage::Error => {
                if ui.button("Retry").clicked() {
                    action = ProcessingAction::Retry;
                }
                if ui.button("⟲ Start Over").clicked() {
                    action = ProcessingAction::StartOver;
                }
            }
            _ => {
                if ui.button("✖ Cancel").clicked() {
                    action = ProcessingAction::Cancel;
                }
            }
        });
    });

    action
}
