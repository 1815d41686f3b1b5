//! Command-line interface for ranking Boom feed exports.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod rank;

pub use error::CliError;

pub(crate) const ARG_RANK_FEED: &str = "feed";
pub(crate) const ARG_ON_INVALID: &str = "on-invalid";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_LIKE_WEIGHT: &str = "like-weight";
pub(crate) const ARG_COMMENT_WEIGHT: &str = "comment-weight";
pub(crate) const ARG_SAVE_WEIGHT: &str = "save-weight";
pub(crate) const ARG_SHARE_WEIGHT: &str = "share-weight";
pub(crate) const ARG_VIEW_WEIGHT: &str = "view-weight";
pub(crate) const ENV_RANK_FEED: &str = "BOOM_CMDS_RANK_FEED_PATH";

/// Run the Boom CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, input
/// validation, or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    match cli.command {
        Command::Rank(args) => rank::run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "boom",
    about = "Offline tooling for the Boom short-video feed",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Rank a JSON export of feed rows by engagement.
    Rank(rank::RankArgs),
}

#[cfg(test)]
mod tests;
