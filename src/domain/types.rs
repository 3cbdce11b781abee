//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values, durations and dates are enforced at the boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Number of minutes in one calendar day.
pub const MINUTES_PER_DAY: i32 = 1440;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A duration fell outside the inclusive `[1, 1440]` minute range.
    #[error("duration must be between 1 and 1440 minutes")]
    DurationOutOfRange,
    /// A date string was not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

id_newtype!(ActivityId, "Unique identifier for an activity.", "activity_id");

non_empty_string_newtype!(
    OwnerId,
    "Opaque identifier of the identity owning an activity.",
    "owner"
);
non_empty_string_newtype!(
    ActivityName,
    "Activity label enforcing non-empty values.",
    "activity name"
);
non_empty_string_newtype!(
    ActivityCategory,
    "Free-form activity category enforcing non-empty values.",
    "category"
);

/// Duration of a single activity in whole minutes, within `[1, 1440]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct DurationMinutes(i32);

impl DurationMinutes {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (1..=MINUTES_PER_DAY).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::DurationOutOfRange)
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for DurationMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for DurationMinutes {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DurationMinutes> for i32 {
    fn from(value: DurationMinutes) -> Self {
        value.0
    }
}

/// Calendar day an activity is attributed to.
///
/// Serialized and parsed strictly as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityDate(NaiveDate);

impl ActivityDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let trimmed = value.trim();
        // chrono also takes signs and unpadded fields; only `dddd-dd-dd` passes here
        let canonical = trimmed.len() == 10
            && trimmed.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !canonical {
            return Err(TypeConstraintError::InvalidDate(trimmed.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidDate(trimmed.to_string()))
    }

    pub const fn get(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ActivityDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl From<ActivityDate> for NaiveDate {
    fn from(value: ActivityDate) -> Self {
        value.0
    }
}

impl Display for ActivityDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl TryFrom<&str> for ActivityDate {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for ActivityDate {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ActivityDate> for String {
    fn from(value: ActivityDate) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_non_empty_strings() {
        let value = ActivityName::new("  Morning run  ").unwrap();
        assert_eq!(value.as_str(), "Morning run");
    }

    #[test]
    fn rejects_blank_category() {
        let err = ActivityCategory::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("category"));
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = ActivityId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("activity_id"));
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        assert!(DurationMinutes::new(1).is_ok());
        assert!(DurationMinutes::new(MINUTES_PER_DAY).is_ok());
        assert_eq!(
            DurationMinutes::new(0).unwrap_err(),
            TypeConstraintError::DurationOutOfRange
        );
        assert_eq!(
            DurationMinutes::new(1441).unwrap_err(),
            TypeConstraintError::DurationOutOfRange
        );
    }

    #[test]
    fn duration_deserialization_is_validated() {
        assert!(serde_json::from_str::<DurationMinutes>("90").is_ok());
        assert!(serde_json::from_str::<DurationMinutes>("-5").is_err());
    }

    #[test]
    fn parses_canonical_dates_only() {
        let date = ActivityDate::parse("2024-01-01").unwrap();
        assert_eq!(date.to_string(), "2024-01-01");
        assert!(ActivityDate::parse("2024-1-1").is_err());
        assert!(ActivityDate::parse("+2024-1-01").is_err());
        assert!(ActivityDate::parse("2024-01-1 ").is_err());
        assert!(ActivityDate::parse("2024/01/01").is_err());
        assert!(ActivityDate::parse("2024-02-30").is_err());
        assert!(ActivityDate::parse("yesterday").is_err());
    }

    #[test]
    fn date_serializes_as_plain_string() {
        let date = ActivityDate::parse("2024-03-15").unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-03-15\"");
    }

    #[test]
    fn date_deserialization_is_strict() {
        let date: ActivityDate = serde_json::from_str("\"2024-03-15\"").unwrap();
        assert_eq!(date, ActivityDate::parse("2024-03-15").unwrap());
        assert!(serde_json::from_str::<ActivityDate>("\"+2024-3-15\"").is_err());
        assert!(serde_json::from_str::<ActivityDate>("\"2024-3-15\"").is_err());
    }
}
