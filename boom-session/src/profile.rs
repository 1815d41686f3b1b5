//! Per-session gamification state: coins, experience, and favourites.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Experience points needed to advance one level.
pub const XP_PER_LEVEL: u64 = 100;

/// Snapshot of a shopper's coins, experience, and favourite items.
///
/// Levels are derived from experience and never stored: level 1 covers
/// `0..100` XP, level 2 covers `100..200`, and so on.
///
/// # Examples
/// ```
/// use boom_session::SessionProfile;
///
/// let profile = SessionProfile { xp: 250, ..SessionProfile::default() };
/// assert_eq!(profile.level(), 3);
/// assert_eq!(profile.xp_into_level(), 50);
/// assert_eq!(profile.xp_to_next_level(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionProfile {
    /// Spendable coin balance.
    pub coins: u64,
    /// Accumulated experience points.
    pub xp: u64,
    /// Identifiers of favourited products or videos.
    pub favourites: BTreeSet<String>,
}

impl SessionProfile {
    /// Return the current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> u64 {
        level_for(self.xp)
    }

    /// Return the experience earned within the current level.
    #[must_use]
    pub const fn xp_into_level(&self) -> u64 {
        self.xp.rem_euclid(XP_PER_LEVEL)
    }

    /// Return the experience still needed to reach the next level.
    #[must_use]
    pub const fn xp_to_next_level(&self) -> u64 {
        XP_PER_LEVEL - self.xp_into_level()
    }

    /// Report whether `item_id` is a favourite.
    #[must_use]
    pub fn is_favourite(&self, item_id: &str) -> bool {
        self.favourites.contains(item_id)
    }
}

/// Level reached with `xp` experience points.
#[must_use]
pub const fn level_for(xp: u64) -> u64 {
    xp.div_euclid(XP_PER_LEVEL).saturating_add(1)
}

/// A level change caused by awarding experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// Level before the award.
    pub from: u64,
    /// Level after the award.
    pub to: u64,
}
