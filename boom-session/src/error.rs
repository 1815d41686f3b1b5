//! Error types raised while reading, mutating, or persisting a session
//! profile.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised by [`ProfileStore`](crate::ProfileStore) and snapshot stores.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading an existing snapshot failed.
    #[error("failed to read profile snapshot at {path}")]
    ReadSnapshot {
        /// Snapshot file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A snapshot file held invalid JSON.
    #[error("failed to parse profile snapshot at {path}")]
    ParseSnapshot {
        /// Snapshot file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Serialising the profile failed.
    #[error("failed to serialise profile snapshot for {path}")]
    SerialiseSnapshot {
        /// Snapshot file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the snapshot file failed.
    #[error("failed to write profile snapshot at {path}")]
    WriteSnapshot {
        /// Snapshot file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A purchase asked for more coins than the balance holds.
    #[error("cannot spend {requested} coins with a balance of {balance}")]
    InsufficientCoins {
        /// Coins requested.
        requested: u64,
        /// Coins available.
        balance: u64,
    },
}
