//! Reads an exported tracker snapshot from disk

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::{AppSettings, Project, SessionLog};
use crate::error::AppError;
use crate::utils::debug_enabled;

/// Everything the reports need, as written by the tracker's export
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Snapshot {
    #[serde(default)]
    pub(crate) projects: Vec<Project>,
    #[serde(default, alias = "sessionHistory", alias = "sessions")]
    pub(crate) history: Vec<SessionLog>,
    #[serde(default)]
    pub(crate) settings: AppSettings,
}

impl Snapshot {
    pub(crate) fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

pub(crate) fn load_snapshot(path: &Path) -> Result<Snapshot, AppError> {
    let content = fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = Snapshot::from_json(&content).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if debug_enabled() {
        eprintln!(
            "[DEBUG] Loaded {} projects, {} session logs from {}",
            snapshot.projects.len(),
            snapshot.history.len(),
            path.display()
        );
    }

    Ok(snapshot)
}
