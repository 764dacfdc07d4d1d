// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Which top-level view is shown, and the single table deciding it.
//!
//! The view is a function of which session entities are populated. Every
//! store action passes through [`next_view`]; reset is the only action that
//! picks a view without looking at the entities.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppView {
    #[default]
    Upload,
    SelectRoi,
    EditMask,
    Processing,
    Complete,
}

impl AppView {
    pub fn title(&self) -> &'static str {
        match self {
            AppView::Upload => "Upload Video",
            AppView::SelectRoi => "Select Region",
            AppView::EditMask => "Edit Mask",
            AppView::Processing => "Processing",
            AppView::Complete => "Complete",
        }
    }
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Which session entities are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presence {
    pub video: bool,
    pub roi: bool,
    pub mask: bool,
    pub job: bool,
    /// The current job went through completion.
    pub job_completed: bool,
}

/// How an action relates to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    /// The action changed entities; re-derive.
    Derive,
    /// The action never changes which entities exist.
    Keep,
    /// Explicit user action; go to this view whatever the entities say.
    Force(AppView),
}

/// View for a given set of entities.
pub fn derive_view(presence: Presence) -> AppView {
    if !presence.video {
        AppView::Upload
    } else if presence.job && presence.job_completed {
        AppView::Complete
    } else if presence.job || presence.mask {
        AppView::Processing
    } else if presence.roi {
        AppView::EditMask
    } else {
        AppView::SelectRoi
    }
}

pub fn next_view(current: AppView, effect: ViewEffect, presence: Presence) -> AppView {
    match effect {
        ViewEffect::Derive => derive_view(presence),
        ViewEffect::Keep => current,
        ViewEffect::Force(view) => view,
    }
}
