//! Persistence boundary for session profiles.
//!
//! [`SnapshotStore`] is the seam: the profile store hands it a full
//! snapshot after every mutation and reads one back on open.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use crate::{SessionError, SessionProfile};

/// Load and save whole-profile snapshots.
pub trait SnapshotStore {
    /// Return the last saved snapshot, or `None` when nothing was saved yet.
    ///
    /// # Errors
    /// Returns [`SessionError`] when an existing snapshot cannot be read or
    /// decoded.
    fn load(&self) -> Result<Option<SessionProfile>, SessionError>;

    /// Persist `profile`, replacing any earlier snapshot.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the snapshot cannot be written.
    fn save(&mut self, profile: &SessionProfile) -> Result<(), SessionError>;
}

/// Snapshot store writing pretty-printed JSON to a single file.
///
/// Saves replace the file through a staging file and rename, and create the
/// parent directory on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSnapshotStore {
    path: Utf8PathBuf,
}

impl JsonFileSnapshotStore {
    /// Store snapshots at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<Option<SessionProfile>, SessionError> {
        let contents = boom_fs::read_optional_to_string(&self.path).map_err(|source| {
            SessionError::ReadSnapshot {
                path: self.path.clone(),
                source,
            }
        })?;
        let Some(json) = contents else {
            debug!("no profile snapshot at {}", self.path);
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| SessionError::ParseSnapshot {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&mut self, profile: &SessionProfile) -> Result<(), SessionError> {
        let mut payload = serde_json::to_vec_pretty(profile).map_err(|source| {
            SessionError::SerialiseSnapshot {
                path: self.path.clone(),
                source,
            }
        })?;
        payload.push(b'\n');
        boom_fs::write_replacing(&self.path, &payload).map_err(|source| {
            SessionError::WriteSnapshot {
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// In-process snapshot store that records how many saves happened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemorySnapshotStore {
    snapshot: Option<SessionProfile>,
    saves: usize,
}

impl MemorySnapshotStore {
    /// Start from an existing snapshot.
    #[must_use]
    pub const fn with_snapshot(profile: SessionProfile) -> Self {
        Self {
            snapshot: Some(profile),
            saves: 0,
        }
    }

    /// Return the latest snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&SessionProfile> {
        self.snapshot.as_ref()
    }

    /// Return the number of completed saves.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<SessionProfile>, SessionError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, profile: &SessionProfile) -> Result<(), SessionError> {
        self.snapshot = Some(profile.clone());
        self.saves = self.saves.saturating_add(1);
        Ok(())
    }
}
