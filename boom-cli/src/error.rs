//! Error types emitted by the Boom CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` throughout.

use std::sync::Arc;

use boom_core::InvalidCounterError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the Boom CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} path (pass it as an argument or set {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the feed file failed.
    #[error("failed to open feed at {path:?}: {source}")]
    OpenFeed {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The feed file was not a JSON array of feed rows.
    #[error("failed to parse feed JSON at {path:?}: {source}")]
    ParseFeed {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A feed row carried an invalid counter under the `abort` policy.
    #[error("feed at {path:?} is invalid: {source}")]
    InvalidFeed {
        path: Utf8PathBuf,
        #[source]
        source: InvalidCounterError,
    },
    /// Serialising the ranked feed failed.
    #[error("failed to serialise ranked feed: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the ranked feed failed.
    #[error("failed to write ranked feed: {0}")]
    WriteOutput(#[source] std::io::Error),
}
