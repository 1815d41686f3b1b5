//! Engagement scoring and feed ranking for Boom.
//!
//! Every feed item receives a weighted sum of its five engagement counters:
//!
//! ```text
//! score = likes*3 + comments*4 + saves*5 + shares*6 + views*1
//! ```
//!
//! [`rank_feed`] attaches that score to a copy of each item and orders the
//! result by descending score. The sort is stable, so items with equal
//! scores keep their input order. Ranking is pure: inputs are borrowed and
//! never modified, and no state survives between calls.
//!
//! Raw database rows go through [`rank_raw_feed`], which validates every row
//! before ranking and fails on the first malformed counter rather than
//! presenting a partially ranked feed.
//!
//! # Examples
//!
//! ```
//! use boom_core::{Counter, FeedItem};
//! use boom_scorer::rank_feed;
//!
//! let feed = vec![
//!     FeedItem::new("c").with_counter(Counter::Comments, 3).with_counter(Counter::Saves, 2),
//!     FeedItem::new("a").with_counter(Counter::Likes, 10).with_counter(Counter::Views, 100),
//!     FeedItem::new("b").with_counter(Counter::Shares, 5),
//! ];
//! let ranked = rank_feed(&feed);
//! let order: Vec<(&str, u64)> = ranked.iter().map(|r| (r.item.id.as_str(), r.score)).collect();
//! assert_eq!(order, vec![("a", 130), ("b", 30), ("c", 22)]);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use boom_core::{
    Counter, EngagementCounters, FeedItem, InvalidCounterError, RankedFeedItem, RawFeedItem,
    Scorer,
};
use log::debug;

mod weights;

pub use weights::EngagementWeights;

/// [`Scorer`] computing the weighted engagement sum.
///
/// Counters are `u32` and weights `u16`, so the five-term sum always fits in
/// a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngagementScorer {
    weights: EngagementWeights,
}

impl EngagementScorer {
    /// Build a scorer using `weights`.
    #[must_use]
    pub const fn new(weights: EngagementWeights) -> Self {
        Self { weights }
    }
}

impl Scorer for EngagementScorer {
    fn score(&self, counters: &EngagementCounters) -> u64 {
        Counter::ALL
            .into_iter()
            .map(|counter| {
                u64::from(counters.get(counter)) * u64::from(self.weights.weight(counter))
            })
            .sum()
    }
}

/// Rank `items` using the standard engagement weights.
///
/// The output has the same length as the input, is ordered by
/// non-increasing score, and keeps input order among equal scores.
#[must_use]
pub fn rank_feed(items: &[FeedItem]) -> Vec<RankedFeedItem> {
    rank_feed_with(items, EngagementWeights::STANDARD)
}

/// Rank `items` using a custom weight table.
#[must_use]
pub fn rank_feed_with(items: &[FeedItem], weights: EngagementWeights) -> Vec<RankedFeedItem> {
    rank_with_scorer(items, &EngagementScorer::new(weights))
}

/// Rank `items` with any [`Scorer`].
///
/// Sorting uses the standard library's stable sort, which is what keeps
/// ties in input order.
#[must_use]
pub fn rank_with_scorer<S>(items: &[FeedItem], scorer: &S) -> Vec<RankedFeedItem>
where
    S: Scorer + ?Sized,
{
    let mut ranked: Vec<RankedFeedItem> = items
        .iter()
        .map(|item| RankedFeedItem {
            score: scorer.score(&item.counters),
            item: item.clone(),
        })
        .collect();
    ranked.sort_by(|left, right| right.score.cmp(&left.score));
    debug!("ranked {} feed items", ranked.len());
    ranked
}

/// Validate raw rows, then rank them with the standard weights.
///
/// Validation covers the whole batch before any ranking happens, so no
/// output is produced when a single row is malformed.
///
/// # Errors
/// Returns the first [`InvalidCounterError`] encountered, identifying the
/// row and the offending counter.
///
/// # Examples
/// ```
/// use boom_core::{Counter, RawFeedItem};
/// use boom_scorer::rank_raw_feed;
/// use serde_json::json;
///
/// let rows = vec![RawFeedItem::new("z").with_counter(Counter::Likes, json!(-1))];
/// let err = rank_raw_feed(&rows).expect_err("negative likes");
/// assert_eq!(err.item_id, "z");
/// assert_eq!(err.field, Counter::Likes);
/// ```
pub fn rank_raw_feed(rows: &[RawFeedItem]) -> Result<Vec<RankedFeedItem>, InvalidCounterError> {
    let items = rows
        .iter()
        .map(RawFeedItem::validate)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rank_feed(&items))
}
