// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! JSON and YAML file serialization.
//!
//! This module handles reading the YAML configuration and reading/writing
//! the JSON state snapshot kept between sessions.

use crate::error::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Write pretty JSON, creating parent directories. The file is replaced
/// in one rename so a crash never leaves it half-written.
pub fn export_json<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub fn import_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

pub fn import_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_export_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/state.json");
        let mut data = BTreeMap::new();
        data.insert("key".to_string(), 42);

        export_json(&data, &path).unwrap();
        let back: BTreeMap<String, i32> = import_json(&path).unwrap();

        assert_eq!(back, data);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_import_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(import_json::<BTreeMap<String, i32>>(&missing).is_err());

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "key: [unclosed").unwrap();
        assert!(import_yaml::<BTreeMap<String, i32>>(&broken).is_err());
    }
}
