//! Loosely typed feed rows as delivered by the hosted database.
//!
//! Rows arrive as JSON objects whose counters may be absent, `null`, or
//! outright malformed. [`RawFeedItem`] captures that shape without
//! interpretation; [`RawFeedItem::validate`] turns it into a [`FeedItem`]
//! and reports the first counter it cannot accept. Absent and `null`
//! counters become zero; nothing else is coerced.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::{
    Counter, EngagementCounters, FeedItem, InvalidCounterError, InvalidCounterReason, JsonKind,
};

/// Field dropped from pass-through attributes because ranking recomputes it.
const SCORE_FIELD: &str = "score";

/// Feed row as received over the wire, before counter validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFeedItem {
    /// Opaque unique identifier.
    pub id: String,
    /// Raw likes counter.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub likes_count: Option<Value>,
    /// Raw comments counter.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub comments_count: Option<Value>,
    /// Raw saves counter.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub saves_count: Option<Value>,
    /// Raw shares counter.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub shares_count: Option<Value>,
    /// Raw views counter.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub views_count: Option<Value>,
    /// Every other attribute of the row.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawFeedItem {
    /// Create a row with no counters.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set a raw counter value while returning `self` for chaining.
    #[must_use]
    pub fn with_counter(mut self, counter: Counter, value: Value) -> Self {
        *self.slot_mut(counter) = Some(value);
        self
    }

    /// Return the raw value for `counter`, if one was supplied.
    #[must_use]
    pub const fn counter(&self, counter: Counter) -> Option<&Value> {
        match counter {
            Counter::Likes => self.likes_count.as_ref(),
            Counter::Comments => self.comments_count.as_ref(),
            Counter::Saves => self.saves_count.as_ref(),
            Counter::Shares => self.shares_count.as_ref(),
            Counter::Views => self.views_count.as_ref(),
        }
    }

    const fn slot_mut(&mut self, counter: Counter) -> &mut Option<Value> {
        match counter {
            Counter::Likes => &mut self.likes_count,
            Counter::Comments => &mut self.comments_count,
            Counter::Saves => &mut self.saves_count,
            Counter::Shares => &mut self.shares_count,
            Counter::Views => &mut self.views_count,
        }
    }

    /// Validate every counter and build a [`FeedItem`].
    ///
    /// Counters are checked in wire order and the first failure is returned.
    ///
    /// # Errors
    /// Returns [`InvalidCounterError`] when a counter is negative,
    /// fractional, non-numeric, or larger than `u32::MAX`.
    ///
    /// # Examples
    /// ```
    /// use boom_core::{Counter, RawFeedItem};
    /// use serde_json::json;
    ///
    /// let raw = RawFeedItem::new("b").with_counter(Counter::Shares, json!(5));
    /// let item = raw.validate().expect("valid counters");
    /// assert_eq!(item.counters.shares, 5);
    ///
    /// let bad = RawFeedItem::new("z").with_counter(Counter::Likes, json!(-1));
    /// let err = bad.validate().expect_err("negative likes");
    /// assert_eq!(err.item_id, "z");
    /// assert_eq!(err.field, Counter::Likes);
    /// ```
    pub fn validate(&self) -> Result<FeedItem, InvalidCounterError> {
        let mut counters = EngagementCounters::default();
        for counter in Counter::ALL {
            let value = parse_counter(self.counter(counter)).map_err(|reason| {
                InvalidCounterError {
                    item_id: self.id.clone(),
                    field: counter,
                    reason,
                }
            })?;
            counters.set(counter, value);
        }
        Ok(self.build(counters))
    }

    /// Validate every counter, replacing rejected values with zero.
    ///
    /// Returns the item together with one error per rejected counter. Used by
    /// callers that opt into zero-filling; ranking itself never calls it.
    #[must_use]
    pub fn validate_zero_filled(&self) -> (FeedItem, Vec<InvalidCounterError>) {
        let mut counters = EngagementCounters::default();
        let mut rejected = Vec::new();
        for counter in Counter::ALL {
            match parse_counter(self.counter(counter)) {
                Ok(value) => counters.set(counter, value),
                Err(reason) => rejected.push(InvalidCounterError {
                    item_id: self.id.clone(),
                    field: counter,
                    reason,
                }),
            }
        }
        (self.build(counters), rejected)
    }

    fn build(&self, counters: EngagementCounters) -> FeedItem {
        let mut extra = self.extra.clone();
        extra.remove(SCORE_FIELD);
        let supplied = Counter::ALL
            .into_iter()
            .filter_map(|counter| {
                self.counter(counter)
                    .map(|value| (counter.field_name().to_owned(), value.clone()))
            })
            .collect();
        FeedItem::from_row(self.id.clone(), counters, extra, supplied)
    }
}

/// Keep an explicit `null` as `Some(Value::Null)`; only absent fields are `None`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl TryFrom<RawFeedItem> for FeedItem {
    type Error = InvalidCounterError;

    fn try_from(raw: RawFeedItem) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

pub(crate) fn parse_counter(raw: Option<&Value>) -> Result<u32, InvalidCounterReason> {
    match raw {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => parse_number(number),
        Some(Value::String(_)) => Err(InvalidCounterReason::NotNumeric(JsonKind::String)),
        Some(Value::Bool(_)) => Err(InvalidCounterReason::NotNumeric(JsonKind::Bool)),
        Some(Value::Array(_)) => Err(InvalidCounterReason::NotNumeric(JsonKind::Array)),
        Some(Value::Object(_)) => Err(InvalidCounterReason::NotNumeric(JsonKind::Object)),
    }
}

fn parse_number(number: &Number) -> Result<u32, InvalidCounterReason> {
    if let Some(unsigned) = number.as_u64() {
        return u32::try_from(unsigned)
            .map_err(|_| InvalidCounterReason::OutOfRange(number.clone()));
    }
    if number.is_i64() {
        return Err(InvalidCounterReason::Negative(number.clone()));
    }
    number.as_f64().map_or_else(
        || Err(InvalidCounterReason::OutOfRange(number.clone())),
        |float| whole_float(float, number),
    )
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is range-checked against u32 and has no fractional part"
)]
fn whole_float(float: f64, number: &Number) -> Result<u32, InvalidCounterReason> {
    if float < 0.0_f64 {
        return Err(InvalidCounterReason::Negative(number.clone()));
    }
    if float.fract() > 0.0_f64 {
        return Err(InvalidCounterReason::Fractional(number.clone()));
    }
    if float > f64::from(u32::MAX) {
        return Err(InvalidCounterReason::OutOfRange(number.clone()));
    }
    Ok(float as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(0), 0)]
    #[case(json!(42), 42)]
    #[case(json!(2.0), 2)]
    #[case(json!(u32::MAX), u32::MAX)]
    #[case(Value::Null, 0)]
    fn accepts_whole_numbers(#[case] raw: Value, #[case] expected: u32) {
        assert_eq!(parse_counter(Some(&raw)), Ok(expected));
    }

    #[rstest]
    fn absent_counter_is_zero() {
        assert_eq!(parse_counter(None), Ok(0));
    }

    #[rstest]
    #[case(json!(-1))]
    #[case(json!(-0.5))]
    fn rejects_negative_values(#[case] raw: Value) {
        assert!(matches!(
            parse_counter(Some(&raw)),
            Err(InvalidCounterReason::Negative(_))
        ));
    }

    #[rstest]
    fn rejects_fractional_values() {
        assert!(matches!(
            parse_counter(Some(&json!(1.5))),
            Err(InvalidCounterReason::Fractional(_))
        ));
    }

    #[rstest]
    #[case(json!(u64::from(u32::MAX) + 1))]
    #[case(json!(1e12))]
    fn rejects_out_of_range_values(#[case] raw: Value) {
        assert!(matches!(
            parse_counter(Some(&raw)),
            Err(InvalidCounterReason::OutOfRange(_))
        ));
    }

    #[rstest]
    #[case(json!("12"), JsonKind::String)]
    #[case(json!(true), JsonKind::Bool)]
    #[case(json!([1]), JsonKind::Array)]
    #[case(json!({"n": 1}), JsonKind::Object)]
    fn rejects_non_numeric_values(#[case] raw: Value, #[case] kind: JsonKind) {
        assert_eq!(
            parse_counter(Some(&raw)),
            Err(InvalidCounterReason::NotNumeric(kind))
        );
    }

    #[rstest]
    fn validate_reports_first_offending_field() {
        let raw = RawFeedItem::new("z")
            .with_counter(Counter::Saves, json!("lots"))
            .with_counter(Counter::Likes, json!(-1));
        let err = raw.validate().expect_err("two bad counters");
        assert_eq!(err.item_id, "z");
        assert_eq!(err.field, Counter::Likes);
        assert_eq!(
            err.to_string(),
            "invalid likesCount for feed item \"z\": -1 is negative"
        );
    }

    #[rstest]
    fn zero_fill_reports_every_rejection() {
        let raw = RawFeedItem::new("z")
            .with_counter(Counter::Likes, json!(-1))
            .with_counter(Counter::Saves, json!("lots"))
            .with_counter(Counter::Views, json!(9));
        let (item, rejected) = raw.validate_zero_filled();
        assert_eq!(item.counters.likes, 0);
        assert_eq!(item.counters.saves, 0);
        assert_eq!(item.counters.views, 9);
        let fields: Vec<Counter> = rejected.iter().map(|err| err.field).collect();
        assert_eq!(fields, vec![Counter::Likes, Counter::Saves]);
    }

    #[rstest]
    fn extra_fields_pass_through_without_stale_score() {
        let raw: RawFeedItem = serde_json::from_value(json!({
            "id": "a",
            "likesCount": 1,
            "title": "Haul",
            "media": {"url": "https://cdn.example/a.mp4"},
            "score": 999,
        }))
        .expect("decode raw row");
        let item = raw.validate().expect("valid row");
        assert_eq!(item.extra.get("title"), Some(&json!("Haul")));
        assert!(item.extra.contains_key("media"));
        assert!(!item.extra.contains_key("score"));
        assert!(!item.extra.contains_key("likesCount"));
    }

    #[rstest]
    fn zero_filled_counters_serialise_as_zero() {
        let raw = RawFeedItem::new("z")
            .with_counter(Counter::Likes, json!(-1))
            .with_counter(Counter::Views, json!(9.0));
        let (item, _) = raw.validate_zero_filled();
        let value = serde_json::to_value(&item).expect("serialise item");
        assert_eq!(value, json!({"id": "z", "likesCount": 0, "viewsCount": 9.0}));
    }

    #[rstest]
    fn explicit_null_counters_are_kept_apart_from_absent_ones() {
        let raw: RawFeedItem =
            serde_json::from_value(json!({"id": "n", "likesCount": null})).expect("decode row");
        assert_eq!(raw.counter(Counter::Likes), Some(&Value::Null));
        assert_eq!(raw.counter(Counter::Views), None);
        assert_eq!(raw.validate().expect("null counts as zero").counters.likes, 0);
    }
}
