use serde::Serialize;

use crate::domain::activity::{Activity, remaining_minutes, total_minutes};
use crate::domain::types::ActivityDate;

/// One day's activities together with the running totals shown next to them.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayActivities {
    pub date: ActivityDate,
    pub activities: Vec<Activity>,
    pub total_minutes: i64,
    pub remaining_minutes: i64,
}

impl DayActivities {
    pub fn new(date: ActivityDate, activities: Vec<Activity>) -> Self {
        let total = total_minutes(&activities);
        Self {
            date,
            activities,
            total_minutes: total,
            remaining_minutes: remaining_minutes(total),
        }
    }
}
