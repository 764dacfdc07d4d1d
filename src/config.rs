// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Read from `<config dir>/demark/config.yaml` when present, then
//! overridden by `DEMARK_API_URL` and `DEMARK_POLL_INTERVAL_MS`.

use crate::error::{DemarkError, Result};
use crate::io::serialization;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const STATE_FILE_NAME: &str = "state.json";
const APP_DIR: &str = "demark";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL every endpoint path is appended to.
    pub api_base_url: String,
    /// Job status poll period.
    pub poll_interval_ms: u64,
    pub request_timeout_secs: u64,
    pub upload_timeout_secs: u64,
    /// Where settings and job history are kept between sessions.
    pub state_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".to_string(),
            poll_interval_ms: 1000,
            request_timeout_secs: 30,
            upload_timeout_secs: 300,
            state_file: None,
        }
    }
}

impl AppConfig {
    /// Defaults, the user's config file, then the environment.
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config: AppConfig = serialization::import_yaml(path)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = var("DEMARK_API_URL") {
            self.api_base_url = url;
        }
        if let Some(interval) = var("DEMARK_POLL_INTERVAL_MS") {
            self.poll_interval_ms = interval.trim().parse().map_err(|_| {
                DemarkError::Config(format!("DEMARK_POLL_INTERVAL_MS is not a number: {}", interval))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(DemarkError::Config("api_base_url must not be empty".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(DemarkError::Config("poll_interval_ms must be positive".into()));
        }
        if self.request_timeout_secs == 0 || self.upload_timeout_secs == 0 {
            return Err(DemarkError::Config("timeouts must be positive".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    /// Persisted-state location: the configured path, else the user data dir.
    pub fn state_path(&self) -> Option<PathBuf> {
        self.state_file
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR).join(STATE_FILE_NAME)))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}
