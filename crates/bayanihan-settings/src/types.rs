//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so that a
//! partial settings file only overrides what it names.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// ```json
/// {
///   "dataDir": "/var/lib/bayanihan",
///   "logging": { "level": "info" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HubSettings {
    /// Directory holding the four JSON documents.
    pub data_dir: String,
    /// File names of the four documents, relative to `data_dir`.
    pub files: FileSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            files: FileSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl HubSettings {
    fn resolve(&self, file: &str) -> PathBuf {
        PathBuf::from(&self.data_dir).join(file)
    }

    /// Path of the users document.
    pub fn users_path(&self) -> PathBuf {
        self.resolve(&self.files.users)
    }

    /// Path of the approved events document.
    pub fn approved_path(&self) -> PathBuf {
        self.resolve(&self.files.approved)
    }

    /// Path of the pending events document.
    pub fn pending_path(&self) -> PathBuf {
        self.resolve(&self.files.pending)
    }

    /// Path of the denied events document.
    pub fn denied_path(&self) -> PathBuf {
        self.resolve(&self.files.denied)
    }
}

/// File names of the persisted documents.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileSettings {
    /// Users document.
    pub users: String,
    /// Approved events document.
    pub approved: String,
    /// Pending events document.
    pub pending: String,
    /// Denied events document.
    pub denied: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            users: "users.json".to_string(),
            approved: "events.json".to_string(),
            pending: "pending_events.json".to_string(),
            denied: "denied_events.json".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
