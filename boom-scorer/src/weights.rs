//! Per-counter weights applied when scoring engagement.
#![forbid(unsafe_code)]

use boom_core::Counter;
use serde::{Deserialize, Serialize};

/// Integer multipliers applied to each engagement counter.
///
/// The default table (like 3, comment 4, save 5, share 6, view 1) is the
/// production ranking policy and must not change. Custom tables exist for
/// experiments and are only used when passed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngagementWeights {
    /// Multiplier applied to likes.
    pub like: u16,
    /// Multiplier applied to comments.
    pub comment: u16,
    /// Multiplier applied to saves.
    pub save: u16,
    /// Multiplier applied to shares.
    pub share: u16,
    /// Multiplier applied to views.
    pub view: u16,
}

impl EngagementWeights {
    /// The production weight table.
    pub const STANDARD: Self = Self {
        like: 3,
        comment: 4,
        save: 5,
        share: 6,
        view: 1,
    };

    /// Return the multiplier for `counter`.
    #[must_use]
    pub const fn weight(self, counter: Counter) -> u16 {
        match counter {
            Counter::Likes => self.like,
            Counter::Comments => self.comment,
            Counter::Saves => self.save,
            Counter::Shares => self.share,
            Counter::Views => self.view,
        }
    }
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}
