// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the eframe::App trait. It owns the store and the editing engines, runs
//! network work on a tokio runtime and applies the results on the UI
//! thread once per frame, so the store has a single writer.

use crate::api::{HttpApi, ProcessingApi};
use crate::config::AppConfig;
use crate::engine::{BrushEngine, FrameRequest, MaskCanvas, RoiSelector};
use crate::io::media;
use crate::job::{JobEvent, JobLifecycle, JobRequest};
use crate::models::{VideoFrame, VideoInfo};
use crate::store::{Action, AppState, AppView, PersistedState};
use crate::ui::{canvas, mask_editor, processing, properties, recovery, timeline, toolbar, upload};
use crate::util::geometry::Size;
use crate::util::validation::video_extensions;
use image::RgbaImage;
use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Result of background work, delivered to the UI thread.
enum BackgroundEvent {
    Uploaded(Result<VideoInfo, String>),
    Frame {
        request: FrameRequest,
        video_id: String,
        result: Result<RgbaImage, String>,
    },
    Health(bool),
    Downloaded(Result<PathBuf, String>),
}

/// Main application state.
pub struct DemarkApp {
    ctx: egui::Context,
    api: Arc<HttpApi>,

    /// Persisted snapshot location, if the platform has a data dir
    state_path: Option<PathBuf>,

    store: AppState,

    /// Drag selection over the current video's frames
    selector: Option<RoiSelector>,

    /// Base image, mask and display surface for the committed ROI
    mask_canvas: Option<MaskCanvas>,

    brush: BrushEngine,

    lifecycle: JobLifecycle<HttpApi>,

    /// Events of the running job, dropped on cancel
    job_events: Option<UnboundedReceiver<JobEvent>>,

    events_tx: UnboundedSender<BackgroundEvent>,
    events_rx: UnboundedReceiver<BackgroundEvent>,

    frame_texture: Option<egui::TextureHandle>,

    /// Display surface texture and the canvas revision it shows
    mask_texture: Option<(egui::TextureHandle, u64)>,

    /// Loading state message
    loading_message: Option<String>,

    /// Last user-facing message (validation, failed request, saved file)
    notice: Option<String>,

    healthy: Option<bool>,
    downloading: bool,

    /// Set when a view panicked; the recovery screen is shown instead
    fault: Option<String>,

    runtime: Runtime,
}

impl DemarkApp {
    /// Create the application, restoring settings and history from disk.
    pub fn new(ctx: egui::Context, config: &AppConfig, runtime: Runtime, api: Arc<HttpApi>) -> Self {
        let state_path = config.state_path();
        let saved = state_path
            .as_deref()
            .map(PersistedState::load)
            .unwrap_or_default();

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let lifecycle = JobLifecycle::new(Arc::clone(&api), runtime.handle().clone(), config.poll_interval());

        let app = Self {
            ctx,
            api,
            state_path,
            store: AppState::from_persisted(saved),
            selector: None,
            mask_canvas: None,
            brush: BrushEngine::new(),
            lifecycle,
            job_events: None,
            events_tx,
            events_rx,
            frame_texture: None,
            mask_texture: None,
            loading_message: None,
            notice: None,
            healthy: None,
            downloading: false,
            fault: None,
            runtime,
        };
        app.check_health();
        app
    }

    /// Run `work` on the runtime and hand its result to the next frame.
    fn spawn_background<F>(&self, work: F)
    where
        F: Future<Output = BackgroundEvent> + Send + 'static,
    {
        let sender = self.events_tx.clone();
        let ctx = self.ctx.clone();
        self.runtime.spawn(async move {
            let _ = sender.send(work.await);
            ctx.request_repaint();
        });
    }

    fn check_health(&self) {
        let api = Arc::clone(&self.api);
        self.spawn_background(async move {
            let healthy = match api.health().await {
                Ok(healthy) => healthy,
                Err(e) => {
                    log::warn!("Health check failed: {}", e);
                    false
                }
            };
            BackgroundEvent::Health(healthy)
        });
    }

    /// Apply an action, showing validation failures to the user.
    fn dispatch(&mut self, action: Action) -> bool {
        match self.store.dispatch(action) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Rejected: {}", e);
                self.notice = Some(e.to_string());
                false
            }
        }
    }

    /// Validate a picked file and upload it.
    fn begin_upload(&mut self, path: PathBuf) {
        if self.loading_message.is_some() {
            return;
        }
        let upload = match media::prepare_upload(&path) {
            Ok(upload) => upload,
            Err(e) => {
                log::warn!("Rejected {}: {}", path.display(), e);
                self.notice = Some(e.to_string());
                return;
            }
        };

        self.notice = None;
        self.loading_message = Some(format!("Uploading {}...", upload.file_name()));

        let api = Arc::clone(&self.api);
        self.spawn_background(async move {
            BackgroundEvent::Uploaded(api.upload_video(&upload).await.map_err(|e| e.to_string()))
        });
    }

    fn request_frame(&mut self, time: f64) {
        let (Some(selector), Some(video)) = (self.selector.as_mut(), self.store.video.as_ref()) else {
            return;
        };
        let request = selector.request_frame(time);
        let video_id = video.id.clone();

        let api = Arc::clone(&self.api);
        self.spawn_background(async move {
            let result = api
                .fetch_frame(&video_id, request.time)
                .await
                .map_err(|e| e.to_string());
            BackgroundEvent::Frame {
                request,
                video_id,
                result,
            }
        });
    }

    /// Apply finished background work.
    fn drain_background(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                BackgroundEvent::Uploaded(Ok(video)) => {
                    self.loading_message = None;
                    self.lifecycle.detach();
                    self.job_events = None;
                    self.clear_session_engines();
                    self.selector = Some(RoiSelector::new(video.width, video.height));
                    self.dispatch(Action::SetVideo(Some(video)));
                    self.dispatch(Action::SetSelectingRoi(true));
                    self.request_frame(0.0);
                }
                BackgroundEvent::Uploaded(Err(e)) => {
                    log::error!("Upload failed: {}", e);
                    self.loading_message = None;
                    self.notice = Some(format!("Upload failed: {}", e));
                }
                BackgroundEvent::Frame {
                    request,
                    video_id,
                    result,
                } => self.apply_frame(ctx, request, &video_id, result),
                BackgroundEvent::Health(healthy) => {
                    log::info!("Service {}", if healthy { "online" } else { "offline" });
                    self.healthy = Some(healthy);
                }
                BackgroundEvent::Downloaded(result) => {
                    self.downloading = false;
                    self.notice = Some(match result {
                        Ok(path) => format!("Saved to {}", path.display()),
                        Err(e) => {
                            log::error!("Download failed: {}", e);
                            format!("Download failed: {}", e)
                        }
                    });
                }
            }
        }
    }

    fn apply_frame(
        &mut self,
        ctx: &egui::Context,
        request: FrameRequest,
        video_id: &str,
        result: Result<RgbaImage, String>,
    ) {
        if self.store.video.as_ref().map(|v| v.id.as_str()) != Some(video_id) {
            return;
        }

        let image = match result {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Frame at {:.2}s failed: {}", request.time, e);
                self.notice = Some(format!("Could not load frame: {}", e));
                return;
            }
        };

        let accepted = self
            .selector
            .as_mut()
            .is_some_and(|selector| selector.accept_frame(request.seq));
        if !accepted {
            log::debug!("Dropping stale frame {}", request.seq);
            return;
        }

        let color_image = media::to_color_image(&image);
        match &mut self.frame_texture {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.frame_texture = Some(ctx.load_texture("frame", color_image, egui::TextureOptions::LINEAR));
            }
        }
        self.dispatch(Action::SetFrame(Some(VideoFrame::new(request.time, image))));
    }

    fn drain_job_events(&mut self) {
        let Some(receiver) = self.job_events.as_mut() else {
            return;
        };

        let mut events = Vec::new();
        let closed = loop {
            match receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };
        if closed {
            self.job_events = None;
        }

        for event in events {
            let terminal = matches!(event, JobEvent::Completed { .. } | JobEvent::Failed { .. });
            self.dispatch(event.into());
            if terminal {
                self.lifecycle.detach();
            }
        }
    }

    /// A confirmed mask with no job yet starts one.
    fn start_job_if_ready(&mut self) {
        if self.store.current_view() != AppView::Processing
            || self.store.current_job.is_some()
            || self.lifecycle.is_started()
        {
            return;
        }
        let (Some(video), Some(roi), Some(mask)) = (
            self.store.video.clone(),
            self.store.roi,
            self.store.mask.clone(),
        ) else {
            return;
        };

        let request = JobRequest {
            video,
            roi,
            mask,
            settings: self.store.settings,
        };
        self.job_events = self.lifecycle.start(request);
    }

    fn confirm_roi(&mut self) {
        let Some(selector) = &self.selector else {
            return;
        };
        let roi = match selector.confirm() {
            Ok(roi) => roi,
            Err(e) => {
                self.notice = Some(e.to_string());
                return;
            }
        };
        let Some(frame) = self.store.frame.clone() else {
            self.notice = Some("Frame is still loading".to_string());
            return;
        };

        if !self.dispatch(Action::CommitRoi(roi)) {
            return;
        }
        match MaskCanvas::new(&frame.image, roi) {
            Ok(mask_canvas) => {
                log::info!("Editing mask for ROI {}x{} at ({}, {})", roi.width, roi.height, roi.x, roi.y);
                self.mask_canvas = Some(mask_canvas);
                self.mask_texture = None;
                self.notice = None;
            }
            Err(e) => {
                log::error!("Cannot edit mask: {}", e);
                self.notice = Some(e.to_string());
                self.dispatch(Action::ClearRoi);
            }
        }
    }

    /// Leave the mask editor for region selection.
    fn back_to_selection(&mut self) {
        self.mask_canvas = None;
        self.mask_texture = None;
        self.brush.pointer_left();
        if let Some(selector) = self.selector.as_mut() {
            selector.clear();
        }
        self.dispatch(Action::ClearRoi);
        self.dispatch(Action::SetSelectingRoi(true));
    }

    fn confirm_mask(&mut self) {
        let Some(mask_canvas) = &self.mask_canvas else {
            return;
        };
        match mask_canvas.export() {
            Ok(mask) => {
                log::info!("Mask confirmed ({} marked pixels)", mask_canvas.mask().marked_count());
                if self.dispatch(Action::ConfirmMask(mask)) {
                    self.start_job_if_ready();
                }
            }
            Err(e) => {
                log::error!("Mask export failed: {}", e);
                self.notice = Some(format!("Mask export failed: {}", e));
            }
        }
    }

    fn download_output(&mut self) {
        let Some(job) = &self.store.current_job else {
            return;
        };
        let job_id = job.id.clone();
        let file_name = format!("demark_{}", job.video_name);

        let Some(dest) = rfd::FileDialog::new()
            .add_filter("Video", &video_extensions()[..])
            .set_file_name(file_name)
            .save_file()
        else {
            return;
        };

        self.downloading = true;
        let api = Arc::clone(&self.api);
        self.spawn_background(async move {
            BackgroundEvent::Downloaded(api.download_output(&job_id, dest).await.map_err(|e| e.to_string()))
        });
    }

    fn cancel_job(&mut self) {
        log::info!("Job cancelled by user");
        self.lifecycle.cancel();
        self.start_over();
    }

    /// Restart a failed job with the same inputs.
    fn retry_job(&mut self) {
        self.lifecycle.detach();
        self.job_events = None;
        self.dispatch(Action::SetCurrentJob(None));
        self.start_job_if_ready();
    }

    /// Drop the session; settings and history stay.
    fn start_over(&mut self) {
        self.lifecycle.detach();
        self.job_events = None;
        self.clear_session_engines();
        self.dispatch(Action::Reset);
    }

    fn clear_session_engines(&mut self) {
        self.selector = None;
        self.mask_canvas = None;
        self.mask_texture = None;
        self.frame_texture = None;
        self.brush.pointer_left();
        self.downloading = false;
    }

    /// Replace the store with the snapshot on disk.
    fn reload(&mut self) {
        self.start_over();
        let saved = self
            .state_path
            .as_deref()
            .map(PersistedState::load)
            .unwrap_or_default();
        self.store = AppState::from_persisted(saved);
        log::info!("Reloaded saved state");
    }

    fn save_state(&self) {
        let Some(path) = &self.state_path else {
            return;
        };
        if let Err(e) = self.store.snapshot().save(path) {
            log::error!("Failed to save state to {}: {}", path.display(), e);
        }
    }

    fn persist_if_dirty(&mut self) {
        if self.store.take_persist_dirty() {
            self.save_state();
        }
    }

    /// Current display surface texture, re-uploaded when the canvas changed.
    fn mask_display_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        let mask_canvas = self.mask_canvas.as_ref()?;
        let revision = mask_canvas.revision();

        match &mut self.mask_texture {
            Some((_, shown)) if *shown == revision => {}
            Some((texture, shown)) => {
                texture.set(media::to_color_image(mask_canvas.display()), egui::TextureOptions::NEAREST);
                *shown = revision;
            }
            None => {
                let texture = ctx.load_texture(
                    "mask_display",
                    media::to_color_image(mask_canvas.display()),
                    egui::TextureOptions::NEAREST,
                );
                self.mask_texture = Some((texture, revision));
            }
        }
        self.mask_texture.as_ref().map(|(texture, _)| texture.clone())
    }

    fn show_view(&mut self, ui: &mut egui::Ui) {
        match self.store.current_view() {
            AppView::Upload => self.show_upload(ui),
            AppView::SelectRoi => self.show_select_roi(ui),
            AppView::EditMask => self.show_edit_mask(ui),
            AppView::Processing | AppView::Complete => self.show_processing(ui),
        }
    }

    fn show_upload(&mut self, ui: &mut egui::Ui) {
        if let upload::UploadAction::Browse = upload::show(ui, self.loading_message.as_deref()) {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Videos", &video_extensions()[..])
                .pick_file()
            {
                self.begin_upload(path);
            }
        }
    }

    fn show_select_roi(&mut self, ui: &mut egui::Ui) {
        let Some(video) = self.store.video.clone() else {
            return;
        };
        let can_confirm = self.selector.as_ref().is_some_and(RoiSelector::can_confirm);

        let mut confirm = false;
        let mut clear = false;
        ui.horizontal(|ui| {
            ui.heading("Select Region");
            ui.label(egui::RichText::new("Drag over the watermark").weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                confirm = ui
                    .add_enabled(can_confirm, egui::Button::new("✔ Confirm"))
                    .on_disabled_hover_text("Select at least 5x5 pixels")
                    .clicked();
                clear = ui.button("Clear").clicked();
            });
        });

        if let Some(time) = timeline::show(ui, self.store.current_time, video.duration) {
            self.dispatch(Action::SetCurrentTime(time));
            self.request_frame(time);
        }
        ui.separator();

        let candidate = self.selector.as_ref().and_then(RoiSelector::candidate);
        let action = canvas::show(ui, self.frame_texture.as_ref(), (video.width, video.height), candidate);

        if let Some(selector) = self.selector.as_mut() {
            match action {
                canvas::CanvasAction::PointerDown(at, element) => selector.pointer_down(at, element),
                canvas::CanvasAction::PointerMove(at, element) => selector.pointer_move(at, element),
                canvas::CanvasAction::PointerUp => selector.pointer_up(),
                canvas::CanvasAction::None => {}
            }
        }

        let (escape, enter) = ui.input(|i| (i.key_pressed(egui::Key::Escape), i.key_pressed(egui::Key::Enter)));
        if clear || escape {
            if let Some(selector) = self.selector.as_mut() {
                selector.clear();
            }
        }
        if confirm || (enter && can_confirm) {
            self.confirm_roi();
        }
    }

    fn show_edit_mask(&mut self, ui: &mut egui::Ui) {
        let marked = self
            .mask_canvas
            .as_ref()
            .map_or(0, |mask_canvas| mask_canvas.mask().marked_count());

        ui.heading("Edit Mask");
        let action = toolbar::show(ui, &mut self.brush.size, marked);
        ui.separator();

        match action {
            toolbar::ToolbarAction::FillAll => {
                if let Some(mask_canvas) = self.mask_canvas.as_mut() {
                    self.brush.fill_mask(mask_canvas);
                }
            }
            toolbar::ToolbarAction::ClearAll => {
                if let Some(mask_canvas) = self.mask_canvas.as_mut() {
                    self.brush.clear_mask(mask_canvas);
                }
            }
            toolbar::ToolbarAction::Back => {
                self.back_to_selection();
                return;
            }
            toolbar::ToolbarAction::Confirm => {
                self.confirm_mask();
                return;
            }
            toolbar::ToolbarAction::None => {}
        }

        let ctx = ui.ctx().clone();
        let Some(texture) = self.mask_display_texture(&ctx) else {
            ui.label("No region selected");
            return;
        };
        let Some(mask_canvas) = self.mask_canvas.as_mut() else {
            return;
        };

        let surface_size = (mask_canvas.mask().width(), mask_canvas.mask().height());
        let (events, element) =
            mask_editor::show(ui, &texture, surface_size, self.brush.size, self.brush.last_position());
        self.brush
            .set_display(element, Size::from_pixels(surface_size.0, surface_size.1));

        // Every mutation re-renders the surface before the next event.
        for event in events {
            match event {
                mask_editor::SurfaceEvent::Down(at, button) => self.brush.pointer_down(mask_canvas, at, button),
                mask_editor::SurfaceEvent::Move(at) => self.brush.pointer_move(mask_canvas, at),
                mask_editor::SurfaceEvent::Up => self.brush.pointer_up(),
                mask_editor::SurfaceEvent::Left => self.brush.pointer_left(),
            }
        }
    }

    fn show_processing(&mut self, ui: &mut egui::Ui) {
        let Some(job) = &self.store.current_job else {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        };

        match processing::show(ui, job, self.downloading) {
            processing::ProcessingAction::Cancel => self.cancel_job(),
            processing::ProcessingAction::Retry => self.retry_job(),
            processing::ProcessingAction::StartOver => self.start_over(),
            processing::ProcessingAction::Download => self.download_output(),
            processing::ProcessingAction::None => {}
        }
    }

    fn show_sidebar(&mut self, ctx: &egui::Context) {
        let action = if self.store.sidebar_collapsed {
            egui::SidePanel::right("sidebar_collapsed")
                .resizable(false)
                .exact_width(28.0)
                .show(ctx, |ui| {
                    if ui.small_button("⏴").on_hover_text("Settings and history").clicked() {
                        properties::PropertiesAction::SetCollapsed(false)
                    } else {
                        properties::PropertiesAction::None
                    }
                })
                .inner
        } else {
            let locked = self.store.current_job.as_ref().is_some_and(|job| !job.is_terminal());
            egui::SidePanel::right("sidebar")
                .default_width(250.0)
                .show(ctx, |ui| {
                    properties::show(ui, &self.store.settings, &self.store.job_history, locked)
                })
                .inner
        };

        match action {
            properties::PropertiesAction::UpdateSettings(patch) => {
                self.dispatch(Action::UpdateSettings(patch));
            }
            properties::PropertiesAction::SetCollapsed(collapsed) => {
                self.dispatch(Action::SetSidebarCollapsed(collapsed));
            }
            properties::PropertiesAction::None => {}
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (color, text) = match self.healthy {
                    Some(true) => (egui::Color32::from_rgb(0, 200, 80), "Service online"),
                    Some(false) => (egui::Color32::LIGHT_RED, "Service offline"),
                    None => (egui::Color32::GRAY, "Checking service..."),
                };
                ui.label(egui::RichText::new("●").color(color));
                ui.label(egui::RichText::new(text).small());

                if let Some(video) = &self.store.video {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!(
                            "{} - {}x{} @ {:.2} fps",
                            video.name, video.width, video.height, video.fps
                        ))
                        .small(),
                    );
                }

                if let Some(notice) = self.notice.clone() {
                    ui.separator();
                    ui.label(egui::RichText::new(notice).small().color(egui::Color32::from_rgb(250, 200, 80)));
                    if ui.small_button("✖").clicked() {
                        self.notice = None;
                    }
                }
            });
        });
    }
}

impl eframe::App for DemarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_background(ctx);
        self.drain_job_events();
        self.start_job_if_ready();

        // Keep polling results flowing into the view while a job runs.
        if self.lifecycle.is_started() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        if self.store.current_view() == AppView::Upload {
            let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|file| file.path.clone()));
            if let Some(path) = dropped {
                self.begin_upload(path);
            }
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let can_open = self.loading_message.is_none() && !self.lifecycle.is_started();
                    if ui.add_enabled(can_open, egui::Button::new("Open Video...")).clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Videos", &video_extensions()[..])
                            .pick_file()
                        {
                            self.start_over();
                            self.begin_upload(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    let collapsed = self.store.sidebar_collapsed;
                    let label = if collapsed { "Show Sidebar" } else { "Hide Sidebar" };
                    if ui.button(label).clicked() {
                        self.dispatch(Action::SetSidebarCollapsed(!collapsed));
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(self.store.current_view().title()).weak());
                });
            });
        });

        self.show_status_bar(ctx);
        self.show_sidebar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = self.fault.clone() {
                match recovery::show(ui, &message) {
                    recovery::RecoveryAction::ResetState => {
                        self.start_over();
                        self.fault = None;
                    }
                    recovery::RecoveryAction::Reload => {
                        self.reload();
                        self.fault = None;
                    }
                    recovery::RecoveryAction::None => {}
                }
                return;
            }

            let view = self.store.current_view();
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| self.show_view(ui))) {
                let message = panic_message(payload.as_ref());
                log::error!("{} view crashed: {}", view, message);
                self.save_state();
                self.fault = Some(message);
            }
        });

        self.persist_if_dirty();
    }
}

/// Text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown error".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_from_payload() {
        let caught = panic::catch_unwind(|| panic!("texture missing")).unwrap_err();
        assert_eq!(panic_message(caught.as_ref()), "texture missing");

        let caught = panic::catch_unwind(|| panic!("frame {} missing", 3)).unwrap_err();
        assert_eq!(panic_message(caught.as_ref()), "frame 3 missing");

        let caught = panic::catch_unwind(|| std::panic::panic_any(42u8)).unwrap_err();
        assert_eq!(panic_message(caught.as_ref()), "unknown error");
    }
}
