//! Reading and writing the four JSON documents.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, StoreError};
use crate::records::Snapshot;

/// Locations of the four documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorePaths {
    /// Users document.
    pub users: PathBuf,
    /// Approved events document.
    pub approved: PathBuf,
    /// Pending events document.
    pub pending: PathBuf,
    /// Denied events document.
    pub denied: PathBuf,
}

impl StorePaths {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            users: dir.join("users.json"),
            approved: dir.join("events.json"),
            pending: dir.join("pending_events.json"),
            denied: dir.join("denied_events.json"),
        }
    }
}

/// Snapshot-style store over the four documents.
#[derive(Clone, Debug)]
pub struct JsonStore {
    paths: StorePaths,
}

impl JsonStore {
    /// Store over the given document locations.
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    /// Document locations.
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Read every document. Each one degrades to empty on its own.
    #[instrument(skip(self))]
    pub fn load(&self) -> Snapshot {
        let snapshot = Snapshot {
            users: read_records(&self.paths.users, "users"),
            approved: read_records(&self.paths.approved, "approved events"),
            pending: read_records(&self.paths.pending, "pending events"),
            denied: read_records(&self.paths.denied, "denied events"),
        };
        info!(
            users = snapshot.users.len(),
            approved = snapshot.approved.len(),
            pending = snapshot.pending.len(),
            denied = snapshot.denied.len(),
            "store loaded"
        );
        snapshot
    }

    /// Write every document, overwriting what is there.
    ///
    /// Documents are written one after another; a failure part-way leaves
    /// the earlier ones updated.
    #[instrument(skip(self, snapshot))]
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        write_records(&self.paths.users, &snapshot.users)?;
        write_records(&self.paths.approved, &snapshot.approved)?;
        write_records(&self.paths.pending, &snapshot.pending)?;
        write_records(&self.paths.denied, &snapshot.denied)?;
        debug!("store saved");
        Ok(())
    }
}

/// Missing file → empty. Unreadable or malformed → empty with a warning.
fn read_records<T: DeserializeOwned>(path: &Path, label: &str) -> Vec<T> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "{label} file not found, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read {label}, starting empty");
            return Vec::new();
        }
    };

    if data.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<T>>(&data) {
        Ok(records) => records,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse {label}, starting empty");
            Vec::new()
        }
    }
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
    }
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).map_err(|e| StoreError::io(path, e))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
