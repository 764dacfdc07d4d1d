// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application state and its reducer.
//!
//! All entity state lives in [`AppState`] and changes only through
//! [`AppState::dispatch`], on the UI thread. Background work reports back
//! with actions; job actions that name a job other than the current one
//! are ignored, so a late event from a discarded job cannot resurrect it.

use super::persist::PersistedState;
use super::view::{self, AppView, Presence, ViewEffect};
use crate::error::ValidationError;
use crate::job::JobEvent;
use crate::models::{
    ExportSettings, MaskData, ProcessingJob, ProcessingProgress, ProcessingStage, Roi, SettingsPatch,
    VideoFrame, VideoInfo,
};

/// Completed jobs kept in history.
pub const MAX_HISTORY: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the video; `None` goes back to upload.
    SetVideo(Option<VideoInfo>),
    SetFrame(Option<VideoFrame>),
    SetCurrentTime(f64),
    SetSelectingRoi(bool),
    /// Validated against the current video before it is stored.
    CommitRoi(Roi),
    /// Back out of mask editing.
    ClearRoi,
    ConfirmMask(MaskData),
    SetCurrentJob(Option<ProcessingJob>),
    RenameJob { local_id: String, job_id: String },
    UpdateJobProgress { job_id: String, progress: ProcessingProgress },
    CompleteJob { job_id: String, output_url: String },
    FailJob { job_id: String, error: String },
    UpdateSettings(SettingsPatch),
    SetSidebarCollapsed(bool),
    /// Drop the session, keep settings and history.
    Reset,
}

impl Action {
    fn view_effect(&self) -> ViewEffect {
        match self {
            Action::SetVideo(_)
            | Action::CommitRoi(_)
            | Action::ClearRoi
            | Action::ConfirmMask(_)
            | Action::SetCurrentJob(_)
            | Action::CompleteJob { .. } => ViewEffect::Derive,
            Action::Reset => ViewEffect::Force(AppView::Upload),
            Action::SetFrame(_)
            | Action::SetCurrentTime(_)
            | Action::SetSelectingRoi(_)
            | Action::RenameJob { .. }
            | Action::UpdateJobProgress { .. }
            | Action::FailJob { .. }
            | Action::UpdateSettings(_)
            | Action::SetSidebarCollapsed(_) => ViewEffect::Keep,
        }
    }

    fn touches_persisted(&self) -> bool {
        matches!(
            self,
            Action::CompleteJob { .. } | Action::UpdateSettings(_) | Action::SetSidebarCollapsed(_)
        )
    }
}

impl From<JobEvent> for Action {
    fn from(event: JobEvent) -> Self {
        match event {
            JobEvent::Created(job) => Action::SetCurrentJob(Some(job)),
            JobEvent::Renamed { local_id, job_id } => Action::RenameJob { local_id, job_id },
            JobEvent::Progress { job_id, progress } => Action::UpdateJobProgress { job_id, progress },
            JobEvent::Completed { job_id, output_url } => Action::CompleteJob { job_id, output_url },
            JobEvent::Failed { job_id, error } => Action::FailJob { job_id, error },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub video: Option<VideoInfo>,
    pub frame: Option<VideoFrame>,
    /// Scrub position in seconds.
    pub current_time: f64,
    pub roi: Option<Roi>,
    pub is_selecting_roi: bool,
    pub mask: Option<MaskData>,
    pub current_job: Option<ProcessingJob>,
    /// Most recent first, at most [`MAX_HISTORY`].
    pub job_history: Vec<ProcessingJob>,
    pub settings: ExportSettings,
    pub sidebar_collapsed: bool,
    current_view: AppView,
    persist_dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session on top of the saved cross-session state.
    pub fn from_persisted(saved: PersistedState) -> Self {
        Self {
            settings: saved.settings,
            job_history: saved.job_history,
            sidebar_collapsed: saved.sidebar_collapsed,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            settings: self.settings,
            job_history: self.job_history.clone(),
            sidebar_collapsed: self.sidebar_collapsed,
        }
    }

    pub fn current_view(&self) -> AppView {
        self.current_view
    }

    pub fn presence(&self) -> Presence {
        Presence {
            video: self.video.is_some(),
            roi: self.roi.is_some(),
            mask: self.mask.is_some(),
            job: self.current_job.is_some(),
            job_completed: self
                .current_job
                .as_ref()
                .is_some_and(|job| job.completed_at.is_some()),
        }
    }

    /// True once since the last call if settings, history or the sidebar
    /// flag changed.
    pub fn take_persist_dirty(&mut self) -> bool {
        std::mem::take(&mut self.persist_dirty)
    }

    /// Apply one action. Validation failures leave the state untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<(), ValidationError> {
        let effect = action.view_effect();
        let persisted = action.touches_persisted();
        log::debug!("dispatch {:?}", ActionName(&action));

        self.reduce(action)?;

        if persisted {
            self.persist_dirty = true;
        }
        let next = view::next_view(self.current_view, effect, self.presence());
        if next != self.current_view {
            log::info!("View {} -> {}", self.current_view, next);
            self.current_view = next;
        }
        Ok(())
    }

    fn reduce(&mut self, action: Action) -> Result<(), ValidationError> {
        match action {
            Action::SetVideo(video) => self.set_video(video),
            Action::SetFrame(frame) => self.frame = frame,
            Action::SetCurrentTime(time) => self.current_time = time.max(0.0),
            Action::SetSelectingRoi(selecting) => self.is_selecting_roi = selecting,
            Action::CommitRoi(roi) => self.commit_roi(roi)?,
            Action::ClearRoi => {
                self.roi = None;
                self.mask = None;
            }
            Action::ConfirmMask(mask) => {
                if self.roi.is_none() {
                    return Err(ValidationError::NoRoi);
                }
                self.mask = Some(mask);
            }
            Action::SetCurrentJob(job) => self.current_job = job,
            Action::RenameJob { local_id, job_id } => {
                if let Some(job) = self.job_mut(&local_id) {
                    job.id = job_id;
                }
            }
            Action::UpdateJobProgress { job_id, progress } => {
                if let Some(job) = self.job_mut(&job_id) {
                    job.status = progress.stage;
                    job.progress = progress;
                }
            }
            Action::CompleteJob { job_id, output_url } => self.complete_job(&job_id, output_url),
            Action::FailJob { job_id, error } => {
                if let Some(job) = self.job_mut(&job_id) {
                    job.status = ProcessingStage::Error;
                    job.progress.stage = ProcessingStage::Error;
                    job.progress.message = error.clone();
                    job.error = Some(error);
                }
            }
            Action::UpdateSettings(patch) => self.settings.apply(patch),
            Action::SetSidebarCollapsed(collapsed) => self.sidebar_collapsed = collapsed,
            Action::Reset => self.reset(),
        }
        Ok(())
    }

    fn set_video(&mut self, video: Option<VideoInfo>) {
        if let Some(video) = &video {
            log::info!("Video {} ({}x{}, {:.2}s)", video.name, video.width, video.height, video.duration);
        }
        self.video = video;
        self.frame = None;
        self.roi = None;
        self.mask = None;
        self.current_time = 0.0;
        // The job was built from the previous video's ROI and mask.
        self.current_job = None;
    }

    fn commit_roi(&mut self, roi: Roi) -> Result<(), ValidationError> {
        let video = self.video.as_ref().ok_or(ValidationError::NoVideo)?;
        roi.validate(video.width, video.height)?;

        self.roi = Some(roi);
        self.mask = None;
        self.is_selecting_roi = false;
        Ok(())
    }

    fn complete_job(&mut self, job_id: &str, output_url: String) {
        let Some(job) = self.job_mut(job_id) else {
            return;
        };
        if job.completed_at.is_some() {
            return;
        }

        job.status = ProcessingStage::Complete;
        job.output_url = Some(output_url);
        job.completed_at = Some(chrono::Utc::now().timestamp_millis());
        job.progress.stage = ProcessingStage::Complete;
        job.progress.percent = 100;
        job.progress.message = ProcessingStage::Complete.label().to_string();

        let finished = job.clone();
        self.job_history.insert(0, finished);
        self.job_history.truncate(MAX_HISTORY);
    }

    fn reset(&mut self) {
        self.video = None;
        self.frame = None;
        self.current_time = 0.0;
        self.roi = None;
        self.is_selecting_roi = false;
        self.mask = None;
        self.current_job = None;
    }

    /// The current job, if its id is `job_id`.
    fn job_mut(&mut self, job_id: &str) -> Option<&mut ProcessingJob> {
        match self.current_job.as_mut() {
            Some(job) if job.id == job_id => Some(job),
            Some(job) => {
                log::debug!("Ignoring event for job {} (current is {})", job_id, job.id);
                None
            }
            None => {
                log::debug!("Ignoring event for job {} (no current job)", job_id);
                None
            }
        }
    }
}

/// Short action label for logs; frames and masks are too big to print.
struct ActionName<'a>(&'a Action);

impl std::fmt::Debug for ActionName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            Action::SetVideo(_) => "SetVideo",
            Action::SetFrame(_) => "SetFrame",
            Action::SetCurrentTime(_) => "SetCurrentTime",
            Action::SetSelectingRoi(_) => "SetSelectingRoi",
            Action::CommitRoi(_) => "CommitRoi",
            Action::ClearRoi => "ClearRoi",
            Action::ConfirmMask(_) => "ConfirmMask",
            Action::SetCurrentJob(_) => "SetCurrentJob",
            Action::RenameJob { .. } => "RenameJob",
            Action::UpdateJobProgress { .. } => "UpdateJobProgress",
            Action::CompleteJob { .. } => "CompleteJob",
            Action::FailJob { .. } => "FailJob",
            Action::UpdateSettings(_) => "UpdateSettings",
            Action::SetSidebarCollapsed(_) => "SetSidebarCollapsed",
            Action::Reset => "Reset",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExportQuality;
    use image::RgbaImage;

    fn video(name: &str) -> VideoInfo {
        VideoInfo {
            id: format!("{}-id", name),
            name: name.into(),
            duration: 12.0,
            fps: 30.0,
            width: 1920,
            height: 1080,
            size: 1_000_000,
            ..Default::default()
        }
    }

    fn mask() -> MaskData {
        MaskData {
            data_url: "data:image/png;base64,AAAA".into(),
            width: 200,
            height: 100,
        }
    }

    fn progress(stage: ProcessingStage, percent: u8) -> ProcessingProgress {
        ProcessingProgress {
            stage,
            percent,
            ..ProcessingProgress::starting()
        }
    }

    /// Store with a video, ROI and mask, ready for a job.
    fn ready_state() -> AppState {
        let mut state = AppState::new();
        state.dispatch(Action::SetVideo(Some(video("clip.mp4")))).unwrap();
        state.dispatch(Action::CommitRoi(Roi::new(100, 50, 200, 100))).unwrap();
        state.dispatch(Action::ConfirmMask(mask())).unwrap();
        state
    }

    fn start_job(state: &mut AppState) -> String {
        let job = ProcessingJob::new_local(
            state.video.as_ref().unwrap(),
            state.roi.unwrap(),
            state.mask.clone().unwrap(),
            state.settings,
        );
        let id = job.id.clone();
        state.dispatch(Action::SetCurrentJob(Some(job))).unwrap();
        id
    }

    fn assert_view_derivable(state: &AppState) {
        assert_eq!(state.current_view(), view::derive_view(state.presence()));
    }

    #[test]
    fn test_workflow_views() {
        let mut state = AppState::new();
        assert_eq!(state.current_view(), AppView::Upload);

        state.dispatch(Action::SetVideo(Some(video("clip.mp4")))).unwrap();
        assert_eq!(state.current_view(), AppView::SelectRoi);

        state.dispatch(Action::SetSelectingRoi(true)).unwrap();
        state.dispatch(Action::CommitRoi(Roi::new(100, 50, 200, 100))).unwrap();
        assert_eq!(state.current_view(), AppView::EditMask);
        assert!(!state.is_selecting_roi);

        state.dispatch(Action::ClearRoi).unwrap();
        assert_eq!(state.current_view(), AppView::SelectRoi);

        state.dispatch(Action::CommitRoi(Roi::new(100, 50, 200, 100))).unwrap();
        state.dispatch(Action::ConfirmMask(mask())).unwrap();
        assert_eq!(state.current_view(), AppView::Processing);

        start_job(&mut state);
        assert_eq!(state.current_view(), AppView::Processing);
        assert_view_derivable(&state);
    }

    #[test]
    fn test_set_video_clears_session() {
        let mut state = ready_state();
        state.dispatch(Action::SetCurrentTime(4.5)).unwrap();
        state
            .dispatch(Action::SetFrame(Some(VideoFrame::new(4.5, RgbaImage::new(4, 4)))))
            .unwrap();

        state.dispatch(Action::SetVideo(Some(video("other.mp4")))).unwrap();
        assert_eq!(state.roi, None);
        assert_eq!(state.mask, None);
        assert_eq!(state.current_time, 0.0);
        assert!(state.frame.is_none());
        assert_eq!(state.current_view(), AppView::SelectRoi);

        state.dispatch(Action::SetVideo(None)).unwrap();
        assert_eq!(state.current_view(), AppView::Upload);
    }

    #[test]
    fn test_set_video_after_completed_job_selects_region() {
        let mut state = ready_state();
        let id = start_job(&mut state);
        state
            .dispatch(Action::CompleteJob {
                job_id: id,
                output_url: "https://x/out.mp4".into(),
            })
            .unwrap();
        assert_eq!(state.current_view(), AppView::Complete);

        state.dispatch(Action::SetVideo(Some(video("next.mp4")))).unwrap();
        assert!(state.current_job.is_none());
        assert_eq!(state.current_view(), AppView::SelectRoi);
        assert_eq!(state.job_history.len(), 1);
        assert_view_derivable(&state);
    }

    #[test]
    fn test_set_video_drops_running_job() {
        let mut state = ready_state();
        let id = start_job(&mut state);
        assert_eq!(state.current_view(), AppView::Processing);

        state.dispatch(Action::SetVideo(Some(video("next.mp4")))).unwrap();
        assert_eq!(state.current_view(), AppView::SelectRoi);

        // Late progress for the dropped job is ignored.
        state
            .dispatch(Action::UpdateJobProgress {
                job_id: id,
                progress: progress(ProcessingStage::Inpainting, 40),
            })
            .unwrap();
        assert!(state.current_job.is_none());
        assert_eq!(state.current_view(), AppView::SelectRoi);
    }

    #[test]
    fn test_invalid_roi_is_rejected_without_mutation() {
        let mut state = AppState::new();
        assert_eq!(
            state.dispatch(Action::CommitRoi(Roi::new(0, 0, 10, 10))),
            Err(ValidationError::NoVideo)
        );

        state.dispatch(Action::SetVideo(Some(video("clip.mp4")))).unwrap();
        assert!(matches!(
            state.dispatch(Action::CommitRoi(Roi::new(0, 0, 4, 100))),
            Err(ValidationError::RoiTooSmall { .. })
        ));
        assert_eq!(
            state.dispatch(Action::CommitRoi(Roi::new(1900, 0, 40, 40))),
            Err(ValidationError::RoiOutOfBounds)
        );
        assert_eq!(state.roi, None);
        assert_eq!(state.current_view(), AppView::SelectRoi);
    }

    #[test]
    fn test_confirm_mask_needs_roi() {
        let mut state = AppState::new();
        state.dispatch(Action::SetVideo(Some(video("clip.mp4")))).unwrap();
        assert_eq!(state.dispatch(Action::ConfirmMask(mask())), Err(ValidationError::NoRoi));
        assert_eq!(state.mask, None);
    }

    #[test]
    fn test_job_runs_to_completion() {
        let mut state = ready_state();
        let local_id = start_job(&mut state);
        assert_eq!(state.current_job.as_ref().unwrap().status, ProcessingStage::Uploading);

        state
            .dispatch(Action::RenameJob {
                local_id,
                job_id: "server-1".into(),
            })
            .unwrap();
        state
            .dispatch(Action::UpdateJobProgress {
                job_id: "server-1".into(),
                progress: progress(ProcessingStage::Inpainting, 40),
            })
            .unwrap();
        let job = state.current_job.as_ref().unwrap();
        assert_eq!(job.status, ProcessingStage::Inpainting);
        assert_eq!(job.progress.percent, 40);
        assert_eq!(state.current_view(), AppView::Processing);

        state
            .dispatch(Action::CompleteJob {
                job_id: "server-1".into(),
                output_url: "https://x/out.mp4".into(),
            })
            .unwrap();

        assert_eq!(state.current_view(), AppView::Complete);
        let job = state.current_job.as_ref().unwrap();
        assert_eq!(job.status, ProcessingStage::Complete);
        assert_eq!(job.progress.percent, 100);
        assert_eq!(job.progress.message, "Complete!");
        assert!(job.completed_at.is_some());

        assert_eq!(state.job_history.len(), 1);
        assert_eq!(state.job_history[0].output_url.as_deref(), Some("https://x/out.mp4"));
        assert!(state.take_persist_dirty());
        assert!(!state.take_persist_dirty());

        // A duplicate completion does not add a second entry.
        state
            .dispatch(Action::CompleteJob {
                job_id: "server-1".into(),
                output_url: "https://x/out.mp4".into(),
            })
            .unwrap();
        assert_eq!(state.job_history.len(), 1);
    }

    #[test]
    fn test_failure_keeps_view() {
        let mut state = ready_state();
        let id = start_job(&mut state);

        state
            .dispatch(Action::FailJob {
                job_id: id,
                error: "GPU out of memory".into(),
            })
            .unwrap();

        let job = state.current_job.as_ref().unwrap();
        assert_eq!(job.status, ProcessingStage::Error);
        assert_eq!(job.error.as_deref(), Some("GPU out of memory"));
        assert_eq!(job.progress.message, "GPU out of memory");
        assert_eq!(state.current_view(), AppView::Processing);
        assert!(state.job_history.is_empty());
    }

    #[test]
    fn test_events_for_other_jobs_are_ignored() {
        let mut state = ready_state();
        let id = start_job(&mut state);
        let before = state.current_job.clone();

        state
            .dispatch(Action::UpdateJobProgress {
                job_id: "stale".into(),
                progress: progress(ProcessingStage::Encoding, 90),
            })
            .unwrap();
        state
            .dispatch(Action::CompleteJob {
                job_id: "stale".into(),
                output_url: "https://x/old.mp4".into(),
            })
            .unwrap();
        assert_eq!(state.current_job, before);
        assert!(state.job_history.is_empty());

        // After a cancel the job is gone; its late events change nothing.
        state.dispatch(Action::Reset).unwrap();
        state
            .dispatch(Action::UpdateJobProgress {
                job_id: id.clone(),
                progress: progress(ProcessingStage::Inpainting, 60),
            })
            .unwrap();
        state
            .dispatch(Action::CompleteJob {
                job_id: id,
                output_url: "https://x/late.mp4".into(),
            })
            .unwrap();
        assert!(state.current_job.is_none());
        assert!(state.job_history.is_empty());
        assert_eq!(state.current_view(), AppView::Upload);
    }

    #[test]
    fn test_history_is_capped_most_recent_first() {
        let mut state = AppState::new();
        for i in 0..25 {
            state.dispatch(Action::SetVideo(Some(video(&format!("{}.mp4", i))))).unwrap();
            state.dispatch(Action::CommitRoi(Roi::new(0, 0, 10, 10))).unwrap();
            state.dispatch(Action::ConfirmMask(mask())).unwrap();
            let id = start_job(&mut state);
            state
                .dispatch(Action::CompleteJob {
                    job_id: id,
                    output_url: format!("https://x/{}.mp4", i),
                })
                .unwrap();
            state.dispatch(Action::Reset).unwrap();
        }

        assert_eq!(state.job_history.len(), MAX_HISTORY);
        assert_eq!(state.job_history[0].video_name, "24.mp4");
        assert_eq!(state.job_history[MAX_HISTORY - 1].video_name, "5.mp4");
    }

    #[test]
    fn test_reset_keeps_settings_and_history() {
        let mut state = ready_state();
        state
            .dispatch(Action::UpdateSettings(SettingsPatch {
                quality: Some(ExportQuality::Draft),
                ..Default::default()
            }))
            .unwrap();
        let id = start_job(&mut state);
        state
            .dispatch(Action::CompleteJob {
                job_id: id,
                output_url: "https://x/out.mp4".into(),
            })
            .unwrap();

        let settings = serde_json::to_vec(&state.settings).unwrap();
        let history = serde_json::to_vec(&state.job_history).unwrap();

        state.dispatch(Action::Reset).unwrap();

        assert!(state.video.is_none() && state.roi.is_none() && state.mask.is_none());
        assert!(state.current_job.is_none() && state.frame.is_none());
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.current_view(), AppView::Upload);
        assert_eq!(serde_json::to_vec(&state.settings).unwrap(), settings);
        assert_eq!(serde_json::to_vec(&state.job_history).unwrap(), history);
    }

    #[test]
    fn test_view_always_derivable() {
        let mut state = AppState::new();
        let actions = vec![
            Action::SetVideo(Some(video("a.mp4"))),
            Action::SetCurrentTime(3.0),
            Action::CommitRoi(Roi::new(0, 0, 2, 2)),
            Action::CommitRoi(Roi::new(10, 10, 50, 50)),
            Action::SetSidebarCollapsed(true),
            Action::ClearRoi,
            Action::ConfirmMask(mask()),
            Action::CommitRoi(Roi::new(10, 10, 50, 50)),
            Action::ConfirmMask(mask()),
            Action::SetVideo(Some(video("b.mp4"))),
            Action::SetVideo(None),
            Action::Reset,
        ];

        for action in actions {
            let _ = state.dispatch(action);
            assert_view_derivable(&state);
        }
    }

    #[test]
    fn test_persisted_round_trip_drops_session() {
        let mut state = ready_state();
        state.dispatch(Action::SetSidebarCollapsed(true)).unwrap();

        let restored = AppState::from_persisted(state.snapshot());
        assert!(restored.sidebar_collapsed);
        assert!(restored.video.is_none() && restored.roi.is_none() && restored.mask.is_none());
        assert_eq!(restored.current_view(), AppView::Upload);
    }

    #[test]
    fn test_job_events_map_to_actions() {
        let action: Action = JobEvent::Failed {
            job_id: "j".into(),
            error: "boom".into(),
        }
        .into();
        assert_eq!(
            action,
            Action::FailJob {
                job_id: "j".into(),
                error: "boom".into()
            }
        );
    }
}
