//! Validated feed items and their ranked counterparts.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{Counter, RawFeedItem, raw::parse_counter};

/// Engagement tallies for a single feed item.
///
/// Counters are stored as `u32`; the validation boundary rejects larger
/// values so weighted sums always fit in a `u64`.
///
/// # Examples
/// ```
/// use boom_core::{Counter, EngagementCounters};
///
/// let counters = EngagementCounters::default().with(Counter::Likes, 10);
/// assert_eq!(counters.get(Counter::Likes), 10);
/// assert_eq!(counters.get(Counter::Views), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EngagementCounters {
    /// Number of likes.
    pub likes: u32,
    /// Number of comments.
    pub comments: u32,
    /// Number of saves.
    pub saves: u32,
    /// Number of shares.
    pub shares: u32,
    /// Number of views.
    pub views: u32,
}

impl EngagementCounters {
    /// Return the value of `counter`.
    #[must_use]
    pub const fn get(&self, counter: Counter) -> u32 {
        match counter {
            Counter::Likes => self.likes,
            Counter::Comments => self.comments,
            Counter::Saves => self.saves,
            Counter::Shares => self.shares,
            Counter::Views => self.views,
        }
    }

    /// Overwrite the value of `counter`.
    pub const fn set(&mut self, counter: Counter, value: u32) {
        match counter {
            Counter::Likes => self.likes = value,
            Counter::Comments => self.comments = value,
            Counter::Saves => self.saves = value,
            Counter::Shares => self.shares = value,
            Counter::Views => self.views = value,
        }
    }

    /// Set `counter` while returning `self` for chaining.
    #[must_use]
    pub const fn with(mut self, counter: Counter, value: u32) -> Self {
        self.set(counter, value);
        self
    }
}

/// A piece of feed content with validated engagement counters.
///
/// Fields other than the identifier and the five counters are kept verbatim
/// in [`FeedItem::extra`] and re-emitted on serialisation. Deserialising goes
/// through [`RawFeedItem`] so malformed counters are rejected rather than
/// coerced.
///
/// Items decoded from a row remember the counter values the row carried.
/// Serialisation writes those values back as supplied (`null` stays `null`,
/// `2.0` stays `2.0`) while they still match [`FeedItem::counters`], and
/// omits counters the row never had unless they were since set non-zero.
///
/// # Examples
/// ```
/// use boom_core::{Counter, FeedItem};
///
/// let item = FeedItem::new("a")
///     .with_counter(Counter::Likes, 10)
///     .with_counter(Counter::Views, 100);
/// assert_eq!(item.id, "a");
/// assert_eq!(item.counters.likes, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "RawFeedItem")]
pub struct FeedItem {
    /// Opaque unique identifier.
    pub id: String,
    /// Validated engagement counters.
    pub counters: EngagementCounters,
    /// Uninterpreted attributes (title, media references, timestamps).
    pub extra: Map<String, Value>,
    supplied: Map<String, Value>,
}

impl FeedItem {
    /// Create an item with zeroed counters and no extra attributes.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            counters: EngagementCounters::default(),
            extra: Map::new(),
            supplied: Map::new(),
        }
    }

    pub(crate) const fn from_row(
        id: String,
        counters: EngagementCounters,
        extra: Map<String, Value>,
        supplied: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            counters,
            extra,
            supplied,
        }
    }

    /// Set a counter while returning `self` for chaining.
    #[must_use]
    pub const fn with_counter(mut self, counter: Counter, value: u32) -> Self {
        self.counters.set(counter, value);
        self
    }

    /// Replace every counter while returning `self` for chaining.
    #[must_use]
    pub const fn with_counters(mut self, counters: EngagementCounters) -> Self {
        self.counters = counters;
        self
    }

    /// Attach a pass-through attribute while returning `self` for chaining.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

#[derive(Serialize)]
struct FeedItemWire<'a> {
    id: &'a str,
    #[serde(flatten)]
    counters: Map<String, Value>,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

impl FeedItem {
    fn wire_counters(&self) -> Map<String, Value> {
        let mut wire = Map::new();
        for counter in Counter::ALL {
            let value = self.counters.get(counter);
            let emitted = match self.supplied.get(counter.field_name()) {
                Some(raw) if parse_counter(Some(raw)) == Ok(value) => Some(raw.clone()),
                Some(_) => Some(Value::from(value)),
                None => (value != 0).then(|| Value::from(value)),
            };
            if let Some(emitted) = emitted {
                wire.insert(counter.field_name().to_owned(), emitted);
            }
        }
        wire
    }
}

impl Serialize for FeedItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FeedItemWire {
            id: &self.id,
            counters: self.wire_counters(),
            extra: &self.extra,
        }
        .serialize(serializer)
    }
}

/// A feed item annotated with its engagement score.
///
/// Serialises as the item's own fields plus a `score` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedFeedItem {
    /// The item as supplied to the ranker.
    pub item: FeedItem,
    /// Weighted engagement score.
    pub score: u64,
}

#[derive(Serialize)]
struct RankedFeedItemWire<'a> {
    #[serde(flatten)]
    item: &'a FeedItem,
    score: u64,
}

impl Serialize for RankedFeedItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RankedFeedItemWire {
            item: &self.item,
            score: self.score,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn titled_item() -> FeedItem {
        FeedItem::new("clip-1")
            .with_counter(Counter::Likes, 2)
            .with_counter(Counter::Shares, 1)
            .with_extra("title", json!("Unboxing"))
    }

    #[rstest]
    fn counters_round_trip_through_accessors() {
        let mut counters = EngagementCounters::default();
        for (value, counter) in (1_u32..).zip(Counter::ALL) {
            counters.set(counter, value);
        }
        let read: Vec<u32> = Counter::ALL.iter().map(|c| counters.get(*c)).collect();
        assert_eq!(read, vec![1, 2, 3, 4, 5]);
    }

    #[rstest]
    fn serialises_counters_and_extra_fields(titled_item: FeedItem) {
        let value = serde_json::to_value(&titled_item).expect("serialise item");
        assert_eq!(
            value,
            json!({
                "id": "clip-1",
                "likesCount": 2,
                "sharesCount": 1,
                "title": "Unboxing",
            })
        );
    }

    #[rstest]
    fn ranked_item_adds_score(titled_item: FeedItem) {
        let ranked = RankedFeedItem {
            item: titled_item,
            score: 12,
        };
        let value = serde_json::to_value(&ranked).expect("serialise ranked item");
        assert_eq!(value.get("score"), Some(&json!(12)));
        assert_eq!(value.get("title"), Some(&json!("Unboxing")));
    }

    #[rstest]
    fn deserialising_validates_counters() {
        let ok: FeedItem =
            serde_json::from_value(json!({"id": "a", "likesCount": 4})).expect("valid item");
        assert_eq!(ok.counters.likes, 4);

        let err = serde_json::from_value::<FeedItem>(json!({"id": "z", "likesCount": -1}))
            .expect_err("negative counter must fail");
        assert!(err.to_string().contains("likesCount"), "{err}");
    }

    #[rstest]
    fn decoded_rows_keep_their_counter_fields_as_supplied() {
        let row = json!({
            "id": "n",
            "likesCount": null,
            "viewsCount": 2.0,
            "title": "t",
        });
        let item: FeedItem = serde_json::from_value(row.clone()).expect("valid row");
        assert_eq!(item.counters.views, 2);
        let value = serde_json::to_value(&item).expect("serialise item");
        assert_eq!(value, row);
        assert!(value.get("sharesCount").is_none());
    }

    #[rstest]
    fn changed_counters_are_written_as_integers() {
        let item: FeedItem =
            serde_json::from_value(json!({"id": "b", "viewsCount": 2.0})).expect("valid row");
        let value = serde_json::to_value(item.with_counter(Counter::Views, 7))
            .expect("serialise item");
        assert_eq!(value, json!({"id": "b", "viewsCount": 7}));
    }
}
