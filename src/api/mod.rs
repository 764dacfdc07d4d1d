// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Remote inpainting service: contract and HTTP implementation.

pub mod client;
pub mod http;

pub use client::{JobStatusResponse, ProcessingApi, StartJobRequest, VideoUpload};
pub use http::HttpApi;
