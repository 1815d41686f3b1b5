//! Engagement counters tracked for every feed item.
//!
//! The enum names a counter independently of its storage so errors and
//! weight tables can refer to it without stringly-typed field names.
//!
//! # Examples
//! ```
//! use boom_core::Counter;
//!
//! assert_eq!(Counter::Likes.field_name(), "likesCount");
//! assert_eq!(Counter::Shares.to_string(), "sharesCount");
//! ```

use serde::{Deserialize, Serialize};

/// One of the five engagement tallies attached to a feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Counter {
    /// Number of likes.
    #[serde(rename = "likesCount")]
    Likes,
    /// Number of comments.
    #[serde(rename = "commentsCount")]
    Comments,
    /// Number of saves (bookmarks).
    #[serde(rename = "savesCount")]
    Saves,
    /// Number of shares.
    #[serde(rename = "sharesCount")]
    Shares,
    /// Number of views.
    #[serde(rename = "viewsCount")]
    Views,
}

impl Counter {
    /// Every counter in wire order.
    pub const ALL: [Self; 5] = [
        Self::Likes,
        Self::Comments,
        Self::Saves,
        Self::Shares,
        Self::Views,
    ];

    /// Return the JSON field name carrying this counter.
    ///
    /// # Examples
    /// ```
    /// use boom_core::Counter;
    ///
    /// assert_eq!(Counter::Views.field_name(), "viewsCount");
    /// ```
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Likes => "likesCount",
            Self::Comments => "commentsCount",
            Self::Saves => "savesCount",
            Self::Shares => "sharesCount",
            Self::Views => "viewsCount",
        }
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Counter::Likes)]
    #[case(Counter::Comments)]
    #[case(Counter::Saves)]
    #[case(Counter::Shares)]
    #[case(Counter::Views)]
    fn serde_names_match_field_names(#[case] counter: Counter) {
        let value = serde_json::to_value(counter).expect("serialise counter");
        assert_eq!(value, serde_json::Value::from(counter.field_name()));
        let back: Counter = serde_json::from_value(value).expect("deserialise counter");
        assert_eq!(back, counter);
    }
}
