use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{
    ActivityCategory, ActivityDate, ActivityId, ActivityName, DurationMinutes, MINUTES_PER_DAY,
    OwnerId,
};

/// Categories offered by the entry form. Any other non-empty value is accepted.
pub const SUGGESTED_CATEGORIES: [&str; 10] = [
    "Work",
    "Exercise",
    "Learning",
    "Entertainment",
    "Sleep",
    "Meals",
    "Commute",
    "Social",
    "Hobbies",
    "Other",
];

/// Canonical activity record owned by a single identity and attributed to one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    pub owner: OwnerId,
    pub name: ActivityName,
    pub category: ActivityCategory,
    pub duration_minutes: DurationMinutes,
    pub date: ActivityDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Activity`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub owner: OwnerId,
    pub name: ActivityName,
    pub category: ActivityCategory,
    pub duration_minutes: DurationMinutes,
    pub date: ActivityDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of an [`Activity`]. Owner and date are never changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityUpdate {
    pub name: Option<ActivityName>,
    pub category: Option<ActivityCategory>,
    pub duration_minutes: Option<DurationMinutes>,
}

impl ActivityUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.duration_minutes.is_none()
    }

    /// Apply the provided fields to `activity`, leaving the rest untouched.
    pub fn apply_to(&self, activity: &mut Activity, now: NaiveDateTime) {
        if let Some(name) = &self.name {
            activity.name = name.clone();
        }
        if let Some(category) = &self.category {
            activity.category = category.clone();
        }
        if let Some(duration) = self.duration_minutes {
            activity.duration_minutes = duration;
        }
        activity.updated_at = now;
    }
}

/// Sum of durations for a day's activities.
pub fn total_minutes(activities: &[Activity]) -> i64 {
    activities
        .iter()
        .map(|a| i64::from(a.duration_minutes.get()))
        .sum()
}

/// Minutes left in the day given the logged total. Not clamped at zero.
pub fn remaining_minutes(total_minutes: i64) -> i64 {
    i64::from(MINUTES_PER_DAY) - total_minutes
}

/// Raised when a new activity would push the day past 24 hours.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Duration exceeds remaining minutes ({available}m available)")]
pub struct DailyCapExceeded {
    pub available: i64,
}

/// Admission check for new activities against a previously read total.
///
/// The total comes from an earlier list call, so this is advisory only:
/// nothing prevents another writer from adding time between the read and the
/// insert.
pub fn check_daily_cap(
    known_total: i64,
    duration: DurationMinutes,
) -> Result<(), DailyCapExceeded> {
    let available = remaining_minutes(known_total).max(0);
    if i64::from(duration.get()) > available {
        Err(DailyCapExceeded { available })
    } else {
        Ok(())
    }
}
