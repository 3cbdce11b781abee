//! Per-day analytics derived from a list of activities.
//!
//! Nothing here is persisted: a snapshot is recomputed on every read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::activity::{Activity, remaining_minutes, total_minutes};

const MINUTES_PER_HOUR: f64 = 60.0;

/// Aggregate minutes for one category within a day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub minutes: i64,
    pub hours: f64,
    /// Share of the day's logged total, `0` when nothing is logged.
    pub percentage: f64,
}

/// Analytics view for one (owner, date) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_minutes: i64,
    pub total_hours: f64,
    pub remaining_minutes: i64,
    pub total_activities: usize,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub activities: Vec<Activity>,
}

impl AnalyticsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total_activities == 0
    }
}

/// Build the analytics snapshot for a day's activities.
///
/// The input is expected to be pre-filtered to a single owner and date. Sums
/// above one day are reported as-is. Breakdown entries are ordered by
/// descending minutes, then by category name.
pub fn aggregate(activities: Vec<Activity>) -> AnalyticsSnapshot {
    let total = total_minutes(&activities);

    let mut per_category: BTreeMap<&str, i64> = BTreeMap::new();
    for activity in &activities {
        *per_category.entry(activity.category.as_str()).or_default() +=
            i64::from(activity.duration_minutes.get());
    }

    let mut category_breakdown = per_category
        .into_iter()
        .map(|(category, minutes)| CategoryBreakdown {
            category: category.to_string(),
            minutes,
            hours: minutes as f64 / MINUTES_PER_HOUR,
            percentage: if total > 0 {
                minutes as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect::<Vec<_>>();
    // stable sort keeps the alphabetical order from the map for ties
    category_breakdown.sort_by(|a, b| b.minutes.cmp(&a.minutes));

    AnalyticsSnapshot {
        total_minutes: total,
        total_hours: total as f64 / MINUTES_PER_HOUR,
        remaining_minutes: remaining_minutes(total),
        total_activities: activities.len(),
        category_breakdown,
        activities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{
        ActivityCategory, ActivityDate, ActivityId, ActivityName, DurationMinutes, OwnerId,
    };
    use chrono::DateTime;

    fn activity(id: i32, category: &str, minutes: i32) -> Activity {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Activity {
            id: ActivityId::new(id).unwrap(),
            owner: OwnerId::new("u1").unwrap(),
            name: ActivityName::new(format!("activity {id}")).unwrap(),
            category: ActivityCategory::new(category).unwrap(),
            duration_minutes: DurationMinutes::new(minutes).unwrap(),
            date: ActivityDate::parse("2024-01-01").unwrap(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn empty_input_yields_zero_snapshot() {
        let snapshot = aggregate(vec![]);
        assert_eq!(snapshot.total_minutes, 0);
        assert_eq!(snapshot.total_hours, 0.0);
        assert_eq!(snapshot.total_activities, 0);
        assert_eq!(snapshot.remaining_minutes, 1440);
        assert!(snapshot.category_breakdown.is_empty());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn sums_minutes_per_category() {
        let snapshot = aggregate(vec![
            activity(1, "Work", 120),
            activity(2, "Exercise", 45),
            activity(3, "Work", 60),
            activity(4, "Meals", 30),
        ]);

        assert_eq!(snapshot.total_minutes, 255);
        assert_eq!(snapshot.total_activities, 4);
        assert_eq!(snapshot.remaining_minutes, 1185);

        let work = snapshot
            .category_breakdown
            .iter()
            .find(|c| c.category == "Work")
            .unwrap();
        assert_eq!(work.minutes, 180);
        assert_eq!(work.hours, 3.0);

        let breakdown_total: i64 = snapshot.category_breakdown.iter().map(|c| c.minutes).sum();
        assert_eq!(breakdown_total, snapshot.total_minutes);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let snapshot = aggregate(vec![
            activity(1, "Work", 100),
            activity(2, "Sleep", 100),
            activity(3, "Social", 100),
        ]);
        let sum: f64 = snapshot
            .category_breakdown
            .iter()
            .map(|c| c.percentage)
            .sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_is_ordered_by_minutes_then_name() {
        let snapshot = aggregate(vec![
            activity(1, "Social", 30),
            activity(2, "Work", 300),
            activity(3, "Meals", 30),
        ]);
        let order: Vec<&str> = snapshot
            .category_breakdown
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["Work", "Meals", "Social"]);
    }

    #[test]
    fn overbooked_day_is_reported_as_is() {
        let snapshot = aggregate(vec![activity(1, "Work", 1000), activity(2, "Sleep", 600)]);
        assert_eq!(snapshot.total_minutes, 1600);
        assert_eq!(snapshot.remaining_minutes, -160);
    }

    #[test]
    fn repeated_aggregation_is_identical() {
        let input = vec![
            activity(1, "Work", 90),
            activity(2, "Learning", 90),
            activity(3, "Hobbies", 15),
        ];
        let first = serde_json::to_string(&aggregate(input.clone())).unwrap();
        let second = serde_json::to_string(&aggregate(input)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(aggregate(vec![activity(1, "Work", 60)])).unwrap();
        assert_eq!(value["totalHours"], 1.0);
        assert_eq!(value["totalActivities"], 1);
        assert_eq!(value["categoryBreakdown"][0]["percentage"], 100.0);
        assert_eq!(value["activities"][0]["durationMinutes"], 60);
    }
}
