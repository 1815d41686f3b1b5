//! Errors raised while validating raw feed rows.

use serde_json::Number;
use thiserror::Error;

use crate::Counter;

/// A counter was present on a feed row but was not a usable tally.
///
/// Carries the offending item identifier and field so callers can decide
/// whether to skip, zero-fill, or abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} for feed item {item_id:?}: {reason}")]
pub struct InvalidCounterError {
    /// Identifier of the affected item.
    pub item_id: String,
    /// Counter that failed validation.
    pub field: Counter,
    /// Why the value was rejected.
    pub reason: InvalidCounterReason,
}

/// Why a counter value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCounterReason {
    /// The value was below zero.
    #[error("{0} is negative")]
    Negative(Number),
    /// The value was numeric but not a whole number.
    #[error("{0} is not a whole number")]
    Fractional(Number),
    /// The value exceeded the supported counter range.
    #[error("{0} exceeds the maximum of {max}", max = u32::MAX)]
    OutOfRange(Number),
    /// The value was not a JSON number.
    #[error("expected a number, found {0}")]
    NotNumeric(JsonKind),
}

/// Coarse JSON type of a rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    /// A JSON string.
    String,
    /// A JSON boolean.
    Bool,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::String => "a string",
            Self::Bool => "a boolean",
            Self::Array => "an array",
            Self::Object => "an object",
        })
    }
}
