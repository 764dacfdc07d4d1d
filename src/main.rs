// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! DEMARK - watermark removal client
//!
//! A cross-platform desktop application for marking a watermark on a video
//! frame and having a remote inpainting service remove it.

use anyhow::{anyhow, Context, Result};
use demark::api::HttpApi;
use demark::app::DemarkApp;
use demark::config::AppConfig;
use env_logger::Env;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging, `info` unless RUST_LOG says otherwise
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    log::info!("Using processing service at {}", config.api_base_url);

    // Network work runs here; the UI thread never blocks on it
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("demark-io")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let api = Arc::new(HttpApi::new(&config).context("Failed to create HTTP client")?);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true)
            .with_title("DEMARK - Watermark Removal"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "DEMARK",
        options,
        Box::new(move |cc| Ok(Box::new(DemarkApp::new(cc.egui_ctx.clone(), &config, runtime, api)))),
    )
    .map_err(|e| anyhow!("Application error: {}", e))?;

    Ok(())
}
