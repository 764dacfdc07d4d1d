// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video timeline scrubber control.
//!
//! This module provides the timeline scrubber for picking the frame the
//! region is selected on.

use crate::util::format::format_time;

/// Display the scrubber. Returns the new time when the user moved it.
pub fn show(ui: &mut egui::Ui, current_time: f64, duration: f64) -> Option<f64> {
    let mut time = current_time;
    let duration = duration.max(0.0);

    let changed = ui
        .horizontal(|ui| {
            ui.label(egui::RichText::new(format_time(time)).monospace());

            let width = (ui.available_width() - 80.0).max(50.0);
            ui.spacing_mut().slider_width = width;
            let response = ui.add_enabled(
                duration > 0.0,
                egui::Slider::new(&mut time, 0.0..=duration).show_value(false),
            );

            ui.label(egui::RichText::new(format_time(duration)).monospace().weak());
            response.changed()
        })
        .inner;

    changed.then_some(time)
}
