//! Rank command implementation for the Boom CLI.

use boom_core::{Counter, InvalidCounterError, InvalidItemPolicy, RankedFeedItem, RawFeedItem};
use boom_fs::open_utf8_file;
use boom_scorer::{EngagementWeights, rank_feed_with};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};

use crate::{
    ARG_COMMENT_WEIGHT, ARG_LIKE_WEIGHT, ARG_LIMIT, ARG_ON_INVALID, ARG_RANK_FEED,
    ARG_SAVE_WEIGHT, ARG_SHARE_WEIGHT, ARG_VIEW_WEIGHT, CliError, ENV_RANK_FEED,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank a JSON array of feed rows by weighted engagement \
                 (likes x3, comments x4, saves x5, shares x6, views x1) and \
                 print the ranked feed as JSON. Rows with invalid counters \
                 abort the run unless another policy is chosen.",
    about = "Rank feed rows by engagement"
)]
#[ortho_config(prefix = "BOOM")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing an array of feed rows.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) feed_path: Option<Utf8PathBuf>,
    /// Handling of rows with invalid counters: abort, skip, or zero-fill.
    #[arg(long = ARG_ON_INVALID, value_name = "policy")]
    #[serde(default)]
    pub(crate) on_invalid: Option<InvalidItemPolicy>,
    /// Keep only the top N ranked items.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Override the likes weight (default 3).
    #[arg(long = ARG_LIKE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) like_weight: Option<u16>,
    /// Override the comments weight (default 4).
    #[arg(long = ARG_COMMENT_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) comment_weight: Option<u16>,
    /// Override the saves weight (default 5).
    #[arg(long = ARG_SAVE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) save_weight: Option<u16>,
    /// Override the shares weight (default 6).
    #[arg(long = ARG_SHARE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) share_weight: Option<u16>,
    /// Override the views weight (default 1).
    #[arg(long = ARG_VIEW_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) view_weight: Option<u16>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    /// Path to the JSON feed export.
    pub(crate) feed_path: Utf8PathBuf,
    /// Invalid-row handling.
    pub(crate) policy: InvalidItemPolicy,
    /// Optional cap on the number of ranked items printed.
    pub(crate) limit: Option<usize>,
    /// Weight table used for scoring.
    pub(crate) weights: EngagementWeights,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.feed_path, ARG_RANK_FEED)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match boom_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let feed_path = args.feed_path.ok_or(CliError::MissingArgument {
            field: ARG_RANK_FEED,
            env: ENV_RANK_FEED,
        })?;

        let standard = EngagementWeights::STANDARD;
        let weights = EngagementWeights {
            like: args.like_weight.unwrap_or(standard.like),
            comment: args.comment_weight.unwrap_or(standard.comment),
            save: args.save_weight.unwrap_or(standard.save),
            share: args.share_weight.unwrap_or(standard.share),
            view: args.view_weight.unwrap_or(standard.view),
        };

        Ok(Self {
            feed_path,
            policy: args.on_invalid.unwrap_or_default(),
            limit: args.limit,
            weights,
        })
    }
}

/// Ranked items plus the rows or counters a lenient policy set aside.
#[derive(Debug)]
pub(crate) struct RankReport {
    pub(crate) ranked: Vec<RankedFeedItem>,
    pub(crate) rejected: Vec<InvalidCounterError>,
}

#[derive(Serialize)]
struct RankOutput<'a> {
    items: &'a [RankedFeedItem],
    rejected: Vec<RejectedRow<'a>>,
}

#[derive(Serialize)]
struct RejectedRow<'a> {
    id: &'a str,
    field: Counter,
    reason: String,
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(super) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_rank_config(args)?;
    let report = execute_rank(&config)?;
    write_rank_output(writer, &report)
}

fn resolve_rank_config(args: RankArgs) -> Result<RankConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(super) fn execute_rank(config: &RankConfig) -> Result<RankReport, CliError> {
    let rows = load_feed(&config.feed_path)?;
    let decoded = boom_core::decode_feed(&rows, config.policy).map_err(|source| {
        CliError::InvalidFeed {
            path: config.feed_path.clone(),
            source,
        }
    })?;
    for err in &decoded.rejected {
        warn!("{} policy applied: {err}", config.policy);
    }

    let mut ranked = rank_feed_with(&decoded.items, config.weights);
    if let Some(limit) = config.limit {
        ranked.truncate(limit);
    }
    info!(
        "ranked {} of {} feed rows from {}",
        ranked.len(),
        rows.len(),
        config.feed_path
    );
    Ok(RankReport {
        ranked,
        rejected: decoded.rejected,
    })
}

/// Loads a JSON array of raw feed rows from disk.
pub(super) fn load_feed(path: &Utf8Path) -> Result<Vec<RawFeedItem>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenFeed {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseFeed {
        path: path.to_path_buf(),
        source,
    })
}

fn write_rank_output(writer: &mut dyn Write, report: &RankReport) -> Result<(), CliError> {
    let output = RankOutput {
        items: &report.ranked,
        rejected: report
            .rejected
            .iter()
            .map(|err| RejectedRow {
                id: &err.item_id,
                field: err.field,
                reason: err.reason.to_string(),
            })
            .collect(),
    };
    let payload = serde_json::to_string_pretty(&output).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
