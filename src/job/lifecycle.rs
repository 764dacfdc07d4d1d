// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Processing job lifecycle.
//!
//! Starting a job emits a local job, asks the service to start it, renames
//! the local job to the server id and then polls the status endpoint until
//! the job completes, fails or is cancelled. Everything the UI needs to know
//! arrives as [`JobEvent`]s on the returned channel; the lifecycle never
//! touches the application state itself.

use super::poller::{PollHandle, PollStep};
use crate::api::{JobStatusResponse, ProcessingApi, StartJobRequest};
use crate::error::DemarkError;
use crate::models::{ExportSettings, MaskData, ProcessingJob, ProcessingProgress, ProcessingStage, Roi, VideoInfo};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

pub const START_FAILED_MESSAGE: &str = "Failed to start processing";
pub const PROCESSING_FAILED_MESSAGE: &str = "Processing failed";

/// Everything a job is created from.
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub video: VideoInfo,
    pub roi: Roi,
    pub mask: MaskData,
    pub settings: ExportSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    /// A new local job, before the service has seen it.
    Created(ProcessingJob),
    /// The service accepted the job under `job_id`.
    Renamed { local_id: String, job_id: String },
    Progress { job_id: String, progress: ProcessingProgress },
    Completed { job_id: String, output_url: String },
    Failed { job_id: String, error: String },
}

#[derive(Default)]
struct SessionShared {
    server_id: Option<String>,
    poller: Option<PollHandle>,
}

struct Session {
    token: CancellationToken,
    shared: Arc<Mutex<SessionShared>>,
}

fn lock(shared: &Mutex<SessionShared>) -> MutexGuard<'_, SessionShared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives at most one job at a time against a [`ProcessingApi`].
pub struct JobLifecycle<A: ProcessingApi> {
    api: Arc<A>,
    runtime: Handle,
    poll_interval: Duration,
    session: Option<Session>,
}

impl<A: ProcessingApi> JobLifecycle<A> {
    pub fn new(api: Arc<A>, runtime: Handle, poll_interval: Duration) -> Self {
        Self {
            api,
            runtime,
            poll_interval,
            session: None,
        }
    }

    /// True between `start` and `cancel`/`detach`.
    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    /// True while the status loop is still polling.
    pub fn is_polling(&self) -> bool {
        self.session.as_ref().is_some_and(|session| {
            lock(&session.shared)
                .poller
                .as_ref()
                .is_some_and(PollHandle::is_live)
        })
    }

    /// Server id, once the service has accepted the job.
    pub fn server_job_id(&self) -> Option<String> {
        self.session
            .as_ref()
            .and_then(|session| lock(&session.shared).server_id.clone())
    }

    /// Start a job. Returns `None` while a previous start is still owned by
    /// this lifecycle.
    pub fn start(&mut self, request: JobRequest) -> Option<UnboundedReceiver<JobEvent>> {
        if self.session.is_some() {
            log::warn!("Ignoring start: a job is already running");
            return None;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let shared = Arc::new(Mutex::new(SessionShared::default()));

        let job = ProcessingJob::new_local(&request.video, request.roi, request.mask.clone(), request.settings);
        let start_request = StartJobRequest {
            video_id: request.video.id.clone(),
            roi: request.roi,
            mask_data_url: request.mask.data_url,
            settings: request.settings,
        };

        log::info!("Starting job {} for video {}", job.id, job.video_name);
        self.runtime.spawn(run_job(
            Arc::clone(&self.api),
            job,
            start_request,
            self.poll_interval,
            token.clone(),
            Arc::clone(&shared),
            tx,
        ));

        self.session = Some(Session { token, shared });
        Some(rx)
    }

    /// Stop polling now and ask the service to stop, best effort.
    pub fn cancel(&mut self) {
        let Some(server_id) = self.stop_session() else {
            return;
        };

        let api = Arc::clone(&self.api);
        self.runtime.spawn(async move {
            cancel_remote(&*api, &server_id).await;
        });
    }

    /// Stop polling without telling the service, e.g. when the job already
    /// finished or the view that owned it goes away.
    pub fn detach(&mut self) {
        self.stop_session();
    }

    fn stop_session(&mut self) -> Option<String> {
        let session = self.session.take()?;
        session.token.cancel();

        let mut shared = lock(&session.shared);
        if let Some(mut poller) = shared.poller.take() {
            poller.stop();
        }
        shared.server_id.clone()
    }
}

impl<A: ProcessingApi> Drop for JobLifecycle<A> {
    fn drop(&mut self) {
        self.stop_session();
    }
}

async fn run_job<A: ProcessingApi>(
    api: Arc<A>,
    job: ProcessingJob,
    request: StartJobRequest,
    poll_interval: Duration,
    token: CancellationToken,
    shared: Arc<Mutex<SessionShared>>,
    events: UnboundedSender<JobEvent>,
) {
    let local_id = job.id.clone();
    let _ = events.send(JobEvent::Created(job));

    let result = api.start_job(&request).await;

    if token.is_cancelled() {
        // Cancelled while the start call was in flight; the lifecycle never
        // learned the server id, so stop the job from here.
        if let Ok(job_id) = result {
            cancel_remote(&*api, &job_id).await;
        }
        return;
    }

    let job_id = match result {
        Ok(job_id) => job_id,
        Err(e) => {
            log::error!("Failed to start job {}: {}", local_id, e);
            let _ = events.send(JobEvent::Failed {
                job_id: local_id,
                error: failure_message(&e),
            });
            return;
        }
    };

    log::info!("Job {} accepted as {}", local_id, job_id);
    let _ = events.send(JobEvent::Renamed {
        local_id,
        job_id: job_id.clone(),
    });

    let remote = Arc::clone(&api);
    let poll_id = job_id.clone();
    let tick = move |live: CancellationToken| {
        let api = Arc::clone(&api);
        let events = events.clone();
        let job_id = poll_id.clone();
        async move {
            let result = api.job_status(&job_id).await;
            if live.is_cancelled() {
                log::debug!("Discarding late status of job {}", job_id);
                return PollStep::Stop;
            }
            apply_poll(&job_id, result, &events)
        }
    };

    {
        // Checked under the lock `cancel` reads the server id with, so one
        // of the two sides always sees the other.
        let mut state = lock(&shared);
        if !token.is_cancelled() {
            state.server_id = Some(job_id);
            state.poller = Some(PollHandle::spawn(
                &Handle::current(),
                poll_interval,
                token.child_token(),
                tick,
            ));
            return;
        }
    }
    cancel_remote(&*remote, &job_id).await;
}

async fn cancel_remote<A: ProcessingApi>(api: &A, job_id: &str) {
    match api.cancel_job(job_id).await {
        Ok(()) => log::info!("Cancelled job {}", job_id),
        Err(e) => log::warn!("Cancel of job {} was not acknowledged: {}", job_id, e),
    }
}

/// Turn one status poll into events. Only an explicit error status ends
/// the job; a failed request is retried on the next tick.
fn apply_poll(
    job_id: &str,
    result: crate::error::Result<JobStatusResponse>,
    events: &UnboundedSender<JobEvent>,
) -> PollStep {
    let status = match result {
        Ok(status) => status,
        Err(e) => {
            log::warn!("Status poll for job {} failed: {}", job_id, e);
            return PollStep::Continue;
        }
    };

    let _ = events.send(JobEvent::Progress {
        job_id: job_id.to_string(),
        progress: status.progress,
    });

    match status.status {
        ProcessingStage::Complete => match status.output_url {
            Some(output_url) => {
                log::info!("Job {} complete", job_id);
                let _ = events.send(JobEvent::Completed {
                    job_id: job_id.to_string(),
                    output_url,
                });
                PollStep::Stop
            }
            None => PollStep::Continue,
        },
        ProcessingStage::Error => {
            let error = status
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| PROCESSING_FAILED_MESSAGE.to_string());
            log::error!("Job {} failed: {}", job_id, error);
            let _ = events.send(JobEvent::Failed {
                job_id: job_id.to_string(),
                error,
            });
            PollStep::Stop
        }
        _ => PollStep::Continue,
    }
}

/// User-facing text for a failed start call.
fn failure_message(err: &DemarkError) -> String {
    let message = match err {
        DemarkError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    };
    if message.trim().is_empty() {
        START_FAILED_MESSAGE.to_string()
    } else {
        message
    }
}
