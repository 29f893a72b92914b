// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data serialization and deserialization.
//!
//! This module handles saving and loading projects in YAML and JSON
//! formats. The format is picked from the file extension.

use crate::models::project::ProjectData;
use anyhow::{bail, Result};
use std::path::Path;

/// Export project data to YAML format.
pub fn export_yaml(data: &ProjectData, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export project data to JSON format.
pub fn export_json(data: &ProjectData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import project data from YAML format.
pub fn import_yaml(path: &Path) -> Result<ProjectData> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import project data from JSON format.
pub fn import_json(path: &Path) -> Result<ProjectData> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

/// Save a project, choosing the format from the extension.
pub fn save_project(data: &ProjectData, path: &Path) -> Result<()> {
    match extension(path) {
        Some("yaml") | Some("yml") => export_yaml(data, path),
        Some("json") => export_json(data, path),
        other => bail!("Unsupported file extension: {:?}", other),
    }
}

/// Load a project, choosing the format from the extension. Shapes are
/// validated and normalized before the project is returned.
pub fn load_project(path: &Path) -> Result<ProjectData> {
    let data = match extension(path) {
        Some("yaml") | Some("yml") => import_yaml(path)?,
        Some("json") => import_json(path)?,
        other => bail!("Unsupported file extension: {:?}", other),
    };
    Ok(data.validated()?)
}
