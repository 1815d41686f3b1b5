//! Core domain types for the Boom feed engine.
//!
//! Feed rows arrive from the hosted database as loosely typed JSON. This
//! crate parses them into [`FeedItem`] values with validated
//! [`EngagementCounters`], reports malformed counters as
//! [`InvalidCounterError`], and defines the [`Scorer`] seam ranking is built
//! on. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod counter;
mod error;
mod item;
pub mod policy;
mod raw;
mod scorer;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use counter::Counter;
pub use error::{InvalidCounterError, InvalidCounterReason, JsonKind};
pub use item::{EngagementCounters, FeedItem, RankedFeedItem};
pub use policy::{DecodedFeed, InvalidItemPolicy, UnknownPolicy, decode_feed};
pub use raw::RawFeedItem;
pub use scorer::Scorer;
