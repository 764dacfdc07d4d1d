// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

pub mod lifecycle;
pub mod poller;

pub use lifecycle::{JobEvent, JobLifecycle, JobRequest};
pub use poller::{PollHandle, PollStep};
