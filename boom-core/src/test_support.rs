//! Fixtures shared by unit, behaviour, and property tests.

use serde_json::Value;

use crate::{Counter, EngagementCounters, FeedItem, RawFeedItem, Scorer};

/// Test `Scorer` that ignores every counter and returns zero.
///
/// Useful for asserting tie behaviour: every item ties, so ranking must
/// return the input order unchanged.
#[derive(Debug, Copy, Clone, Default)]
pub struct FlatScorer;

impl Scorer for FlatScorer {
    fn score(&self, _counters: &EngagementCounters) -> u64 {
        0
    }
}

/// Build a validated item from `(counter, value)` pairs.
#[must_use]
pub fn feed_item(id: &str, counters: &[(Counter, u32)]) -> FeedItem {
    counters
        .iter()
        .fold(FeedItem::new(id), |item, &(counter, value)| {
            item.with_counter(counter, value)
        })
}

/// Build a raw row from `(counter, value)` pairs.
#[must_use]
pub fn raw_feed_item(id: &str, counters: &[(Counter, Value)]) -> RawFeedItem {
    counters
        .iter()
        .fold(RawFeedItem::new(id), |row, (counter, value)| {
            row.with_counter(*counter, value.clone())
        })
}

/// Return the identifiers of `items` in order.
#[must_use]
pub fn ids<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a FeedItem>,
{
    items.into_iter().map(|item| item.id.clone()).collect()
}
