// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! DEMARK - watermark removal client.
//!
//! Picks a video, selects the watermark region on a frame, paints a mask
//! over it and drives a remote inpainting job to completion.

pub mod api;
pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod job;
pub mod models;
pub mod store;
pub mod ui;
pub mod util;
