//! Facade crate for the Boom feed engine.
//!
//! This crate re-exports the feed domain types and the engagement ranker, and
//! exposes the session profile store behind the `session` feature flag.

#![forbid(unsafe_code)]

pub use boom_core::{
    Counter, DecodedFeed, EngagementCounters, FeedItem, InvalidCounterError,
    InvalidCounterReason, InvalidItemPolicy, RankedFeedItem, RawFeedItem, Scorer, decode_feed,
};

pub use boom_scorer::{
    EngagementScorer, EngagementWeights, rank_feed, rank_feed_with, rank_raw_feed,
    rank_with_scorer,
};

#[cfg(feature = "session")]
pub use boom_session::{
    JsonFileSnapshotStore, LevelUp, MemorySnapshotStore, ProfileStore, SessionError,
    SessionProfile, SnapshotStore,
};
