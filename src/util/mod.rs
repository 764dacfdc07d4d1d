// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shared helpers.

pub mod format;
pub mod geometry;
pub mod validation;
