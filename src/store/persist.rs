// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Cross-session state: export settings, job history and the sidebar flag.
//! The video, ROI, mask and current job are never written.

use super::state::MAX_HISTORY;
use crate::error::Result;
use crate::io::serialization;
use crate::models::{ExportSettings, ProcessingJob};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedState {
    pub settings: ExportSettings,
    /// Most recent first.
    pub job_history: Vec<ProcessingJob>,
    pub sidebar_collapsed: bool,
}

impl PersistedState {
    /// Read the snapshot at `path`. A missing file is a first run; an
    /// unreadable one is logged and replaced by defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No saved state at {}, starting fresh", path.display());
            return Self::default();
        }

        match serialization::import_json::<PersistedState>(path) {
            Ok(mut state) => {
                state.job_history.truncate(MAX_HISTORY);
                log::info!(
                    "Loaded saved state from {} ({} jobs in history)",
                    path.display(),
                    state.job_history.len()
                );
                state
            }
            Err(e) => {
                log::warn!("Ignoring unreadable saved state {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        serialization::export_json(self, path)?;
        log::debug!("Saved state to {}", path.display());
        Ok(())
    }
}
