// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the demark application.

pub mod canvas;
pub mod mask_editor;
pub mod processing;
pub mod properties;
pub mod recovery;
pub mod timeline;
pub mod toolbar;
pub mod upload;
