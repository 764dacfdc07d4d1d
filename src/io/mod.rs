// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for media files and persisted state.

pub mod media;
pub mod serialization;
