//! Score feed items by their engagement.
//!
//! The `Scorer` trait maps a set of
//! [`EngagementCounters`](crate::EngagementCounters) to a ranking score.

use crate::EngagementCounters;

/// Calculate an engagement score for a feed item.
///
/// Higher scores rank earlier in the feed. Implementations must be pure:
/// the same counters always yield the same score, with no dependence on
/// time, randomness, or hidden state. They must be thread-safe (`Send` +
/// `Sync`) so a single scorer can serve concurrent ranking calls.
///
/// # Examples
///
/// ```rust
/// use boom_core::{EngagementCounters, Scorer};
///
/// struct ViewsOnly;
///
/// impl Scorer for ViewsOnly {
///     fn score(&self, counters: &EngagementCounters) -> u64 {
///         u64::from(counters.views)
///     }
/// }
///
/// let counters = EngagementCounters { views: 7, ..EngagementCounters::default() };
/// assert_eq!(ViewsOnly.score(&counters), 7);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `counters`.
    fn score(&self, counters: &EngagementCounters) -> u64;
}
