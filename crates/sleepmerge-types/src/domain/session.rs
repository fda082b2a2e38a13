use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference to one file inside an export directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// Path relative to the export directory root, `/`-separated
    pub path: String,
}

impl FileHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// One contiguous recording period plus the files that may contribute to it.
///
/// Produced by session discovery and consumed once by reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Stable identifier (UUID v5 of profile and marker path)
    pub id: String,
    /// Id of the device profile that discovered the session
    pub profile: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Sibling files keyed by path relative to the marker's directory
    pub files: BTreeMap<String, FileHandle>,
}

impl Session {
    pub fn duration_ms(&self) -> i64 {
        crate::millis_between(self.start, self.end)
    }
}

/// Order sessions oldest first; ties keep a stable order by id.
pub fn sort_sessions(sessions: &mut [Session]) {
    sessions.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
}
