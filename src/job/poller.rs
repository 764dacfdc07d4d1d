// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Cancellable fixed-interval poll task.
//!
//! The first tick fires one period after spawning. Ticks run one at a time:
//! a slow tick delays the next one instead of overlapping it. Stopping never
//! aborts a tick in flight; the tick receives the liveness token and must
//! check it after every await before acting on what it got back.

use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};

/// What the loop does after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    Continue,
    Stop,
}

/// Owner of a running poll loop. Dropping the handle stops the loop.
#[derive(Debug)]
pub struct PollHandle {
    token: CancellationToken,
    stop: Option<DropGuard>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Spawn `tick` every `period` until it returns [`PollStep::Stop`] or
    /// `token` (or a parent of it) is cancelled.
    pub fn spawn<F, Fut>(runtime: &Handle, period: Duration, token: CancellationToken, mut tick: F) -> Self
    where
        F: FnMut(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = PollStep> + Send + 'static,
    {
        let live = token.clone();
        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = live.cancelled() => break,
                    _ = interval.tick() => {}
                }
                if tick(live.clone()).await == PollStep::Stop {
                    live.cancel();
                    break;
                }
            }
            log::debug!("Poll loop finished");
        });

        Self {
            stop: Some(token.clone().drop_guard()),
            token,
            task,
        }
    }

    /// Stop the loop. Returns false if it was already stopped.
    pub fn stop(&mut self) -> bool {
        match self.stop.take() {
            Some(guard) => {
                drop(guard);
                true
            }
            None => false,
        }
    }

    /// False once stopped, cancelled from outside, or finished by a tick.
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
