//! Session-scoped shopper state for the Boom app.
//!
//! A [`ProfileStore`] owns one shopper's [`SessionProfile`] (coins, XP, and
//! favourites) for the lifetime of a session. Every mutation is staged on a
//! copy, written through the [`SnapshotStore`] boundary, and only then made
//! visible. A failed save therefore leaves both the in-memory profile and
//! the last snapshot unchanged.
//!
//! # Examples
//!
//! ```
//! use boom_session::{MemorySnapshotStore, ProfileStore};
//!
//! # fn main() -> Result<(), boom_session::SessionError> {
//! let mut store = ProfileStore::open(MemorySnapshotStore::default())?;
//! store.add_coins(50)?;
//! let level_up = store.award_xp(120)?;
//! assert_eq!(level_up.map(|change| change.to), Some(2));
//! assert!(store.toggle_favourite("sku-42")?);
//! assert_eq!(store.snapshots().save_count(), 3);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use log::{debug, info};

mod error;
mod profile;
mod snapshot;

pub use error::SessionError;
pub use profile::{LevelUp, SessionProfile, XP_PER_LEVEL, level_for};
pub use snapshot::{JsonFileSnapshotStore, MemorySnapshotStore, SnapshotStore};

/// Owner of a single session's profile and its persistence boundary.
#[derive(Debug)]
pub struct ProfileStore<S> {
    snapshots: S,
    profile: SessionProfile,
}

impl<S: SnapshotStore> ProfileStore<S> {
    /// Load the last snapshot from `snapshots`, or start from an empty
    /// profile when none exists.
    ///
    /// # Errors
    /// Propagates [`SessionError`] from [`SnapshotStore::load`].
    pub fn open(snapshots: S) -> Result<Self, SessionError> {
        let profile = snapshots.load()?.unwrap_or_default();
        debug!(
            "opened profile with {} coins at level {}",
            profile.coins,
            profile.level()
        );
        Ok(Self { snapshots, profile })
    }

    /// Return the current profile.
    #[must_use]
    pub const fn profile(&self) -> &SessionProfile {
        &self.profile
    }

    /// Return the snapshot store.
    #[must_use]
    pub const fn snapshots(&self) -> &S {
        &self.snapshots
    }

    /// Credit `amount` coins and return the new balance.
    ///
    /// The balance saturates at `u64::MAX`.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the snapshot cannot be saved.
    pub fn add_coins(&mut self, amount: u64) -> Result<u64, SessionError> {
        let mut next = self.profile.clone();
        next.coins = next.coins.saturating_add(amount);
        self.commit(next)?;
        Ok(self.profile.coins)
    }

    /// Debit `amount` coins and return the new balance.
    ///
    /// # Errors
    /// Returns [`SessionError::InsufficientCoins`] without changing anything
    /// when the balance is too small, or a persistence error when the
    /// snapshot cannot be saved.
    pub fn spend_coins(&mut self, amount: u64) -> Result<u64, SessionError> {
        let balance = self.profile.coins;
        let remaining = balance
            .checked_sub(amount)
            .ok_or(SessionError::InsufficientCoins {
                requested: amount,
                balance,
            })?;
        let mut next = self.profile.clone();
        next.coins = remaining;
        self.commit(next)?;
        Ok(remaining)
    }

    /// Add `amount` experience points.
    ///
    /// Returns the level change when the award crosses a level boundary.
    /// Experience saturates at `u64::MAX`.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the snapshot cannot be saved.
    pub fn award_xp(&mut self, amount: u64) -> Result<Option<LevelUp>, SessionError> {
        let from = self.profile.level();
        let mut next = self.profile.clone();
        next.xp = next.xp.saturating_add(amount);
        let to = next.level();
        self.commit(next)?;
        if to > from {
            info!("profile advanced from level {from} to level {to}");
            return Ok(Some(LevelUp { from, to }));
        }
        Ok(None)
    }

    /// Add `item_id` to favourites, or remove it when already present.
    ///
    /// Returns whether the item is a favourite after the toggle.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the snapshot cannot be saved.
    pub fn toggle_favourite(&mut self, item_id: &str) -> Result<bool, SessionError> {
        let mut next = self.profile.clone();
        let now_favourite = if next.favourites.remove(item_id) {
            false
        } else {
            next.favourites.insert(item_id.to_owned());
            true
        };
        self.commit(next)?;
        Ok(now_favourite)
    }

    fn commit(&mut self, next: SessionProfile) -> Result<(), SessionError> {
        self.snapshots.save(&next)?;
        self.profile = next;
        Ok(())
    }
}
