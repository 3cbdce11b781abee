use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::activity::{
    Activity as DomainActivity, ActivityUpdate, NewActivity as DomainNewActivity,
};
use crate::domain::types::{
    ActivityCategory, ActivityName, DurationMinutes, OwnerId, TypeConstraintError,
};

/// Diesel model representing the `activities` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::activities)]
pub struct Activity {
    pub id: i32,
    pub user_id: String,
    pub name: String,
    pub category: String,
    pub duration_minutes: i32,
    pub activity_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Activity`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::activities)]
pub struct NewActivity {
    pub user_id: String,
    pub name: String,
    pub category: String,
    pub duration_minutes: i32,
    pub activity_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Patch applied by partial updates; `None` columns are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::activities)]
pub struct ActivityChangeset {
    pub name: Option<String>,
    pub category: Option<String>,
    pub duration_minutes: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Activity> for DomainActivity {
    type Error = TypeConstraintError;

    fn try_from(activity: Activity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: activity.id.try_into()?,
            owner: OwnerId::new(activity.user_id)?,
            name: ActivityName::new(activity.name)?,
            category: ActivityCategory::new(activity.category)?,
            duration_minutes: DurationMinutes::new(activity.duration_minutes)?,
            date: activity.activity_date.into(),
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        })
    }
}

impl From<DomainNewActivity> for NewActivity {
    fn from(activity: DomainNewActivity) -> Self {
        Self {
            user_id: activity.owner.into_inner(),
            name: activity.name.into_inner(),
            category: activity.category.into_inner(),
            duration_minutes: activity.duration_minutes.get(),
            activity_date: activity.date.get(),
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }
}

impl ActivityChangeset {
    pub fn new(update: &ActivityUpdate, updated_at: NaiveDateTime) -> Self {
        Self {
            name: update.name.clone().map(String::from),
            category: update.category.clone().map(String::from),
            duration_minutes: update.duration_minutes.map(DurationMinutes::get),
            updated_at,
        }
    }
}
