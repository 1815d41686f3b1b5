//! Caller-side handling of feed rows with invalid counters.
//!
//! Ranking fails fast on the first malformed row. Callers that prefer a
//! partial feed choose an [`InvalidItemPolicy`] and run [`decode_feed`]
//! before ranking.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{FeedItem, InvalidCounterError, RawFeedItem};

/// What to do with a feed row whose counters fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidItemPolicy {
    /// Fail the whole batch on the first invalid row.
    #[default]
    Abort,
    /// Drop invalid rows and keep the rest.
    Skip,
    /// Keep invalid rows with their rejected counters set to zero.
    ZeroFill,
}

impl InvalidItemPolicy {
    /// Return the policy's configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
            Self::ZeroFill => "zero-fill",
        }
    }
}

impl std::fmt::Display for InvalidItemPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown invalid-item policy {0:?} (expected abort, skip, or zero-fill)")]
pub struct UnknownPolicy(pub String);

impl FromStr for InvalidItemPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Abort, Self::Skip, Self::ZeroFill]
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| UnknownPolicy(s.to_owned()))
    }
}

/// Feed rows that survived validation under a policy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedFeed {
    /// Validated items in input order.
    pub items: Vec<FeedItem>,
    /// Counter errors that were skipped or zero-filled.
    pub rejected: Vec<InvalidCounterError>,
}

/// Validate raw rows according to `policy`.
///
/// # Errors
/// Under [`InvalidItemPolicy::Abort`], returns the first
/// [`InvalidCounterError`]. The other policies never fail.
///
/// # Examples
/// ```
/// use boom_core::{Counter, InvalidItemPolicy, RawFeedItem, decode_feed};
/// use serde_json::json;
///
/// let rows = vec![
///     RawFeedItem::new("ok").with_counter(Counter::Likes, json!(1)),
///     RawFeedItem::new("bad").with_counter(Counter::Likes, json!(-1)),
/// ];
/// let decoded = decode_feed(&rows, InvalidItemPolicy::Skip).expect("skip never fails");
/// assert_eq!(decoded.items.len(), 1);
/// assert_eq!(decoded.rejected[0].item_id, "bad");
/// ```
pub fn decode_feed(
    rows: &[RawFeedItem],
    policy: InvalidItemPolicy,
) -> Result<DecodedFeed, InvalidCounterError> {
    let mut decoded = DecodedFeed {
        items: Vec::with_capacity(rows.len()),
        rejected: Vec::new(),
    };
    for row in rows {
        match policy {
            InvalidItemPolicy::Abort => decoded.items.push(row.validate()?),
            InvalidItemPolicy::Skip => match row.validate() {
                Ok(item) => decoded.items.push(item),
                Err(err) => decoded.rejected.push(err),
            },
            InvalidItemPolicy::ZeroFill => {
                let (item, rejected) = row.validate_zero_filled();
                decoded.items.push(item);
                decoded.rejected.extend(rejected);
            }
        }
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Counter;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn rows() -> Vec<RawFeedItem> {
        vec![
            RawFeedItem::new("a").with_counter(Counter::Likes, json!(3)),
            RawFeedItem::new("z")
                .with_counter(Counter::Likes, json!(-1))
                .with_counter(Counter::Views, json!(7)),
            RawFeedItem::new("c").with_counter(Counter::Comments, json!(1)),
        ]
    }

    #[rstest]
    fn abort_fails_on_first_invalid_row(rows: Vec<RawFeedItem>) {
        let err = decode_feed(&rows, InvalidItemPolicy::Abort).expect_err("abort on z");
        assert_eq!(err.item_id, "z");
        assert_eq!(err.field, Counter::Likes);
    }

    #[rstest]
    fn skip_drops_invalid_rows(rows: Vec<RawFeedItem>) {
        let decoded = decode_feed(&rows, InvalidItemPolicy::Skip).expect("skip succeeds");
        let ids: Vec<&str> = decoded.items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(decoded.rejected.len(), 1);
    }

    #[rstest]
    fn zero_fill_keeps_invalid_rows(rows: Vec<RawFeedItem>) {
        let decoded = decode_feed(&rows, InvalidItemPolicy::ZeroFill).expect("zero-fill succeeds");
        assert_eq!(decoded.items.len(), 3);
        let z = decoded
            .items
            .iter()
            .find(|item| item.id == "z")
            .expect("z retained");
        assert_eq!(z.counters.likes, 0);
        assert_eq!(z.counters.views, 7);
        assert_eq!(decoded.rejected.len(), 1);
    }

    #[rstest]
    fn empty_input_is_not_an_error() {
        let decoded = decode_feed(&[], InvalidItemPolicy::Abort).expect("empty feed");
        assert_eq!(decoded, DecodedFeed::default());
    }

    #[rstest]
    #[case("abort", InvalidItemPolicy::Abort)]
    #[case("skip", InvalidItemPolicy::Skip)]
    #[case("zero-fill", InvalidItemPolicy::ZeroFill)]
    fn policies_parse_from_names(#[case] name: &str, #[case] expected: InvalidItemPolicy) {
        assert_eq!(name.parse::<InvalidItemPolicy>(), Ok(expected));
    }

    #[rstest]
    fn unknown_policy_names_fail() {
        assert!("ignore".parse::<InvalidItemPolicy>().is_err());
    }
}
