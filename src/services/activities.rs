use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::activity::{Activity, check_daily_cap, total_minutes};
use crate::domain::types::{ActivityDate, OwnerId};
use crate::dto::activities::DayActivities;
use crate::forms::activities::{
    AddActivityFormPayload, DeleteActivityFormPayload, UpdateActivityFormPayload,
};
use crate::repository::{ActivityListQuery, ActivityReader, ActivityWriter};

use super::errors::from_repository;
use super::{ServiceError, ServiceResult};

/// Activities are keyed by the identity's subject.
pub(crate) fn owner_of(user: &AuthenticatedUser) -> ServiceResult<OwnerId> {
    OwnerId::new(user.sub.as_str()).map_err(|e| {
        log::error!("Invalid subject in user context: {e}");
        ServiceError::Unauthorized
    })
}

/// Activities of the signed-in user for one day, with running totals.
pub fn show_day<R>(date: &str, user: &AuthenticatedUser, repo: &R) -> ServiceResult<DayActivities>
where
    R: ActivityReader,
{
    let owner = owner_of(user)?;
    let date = ActivityDate::parse(date)?;

    let activities = repo
        .list_activities(ActivityListQuery::new(owner, date))
        .map_err(|e| from_repository("Failed to list activities", e))?;

    Ok(DayActivities::new(date, activities))
}

/// Log a new activity for the signed-in user.
///
/// The daily cap is checked against a fresh list of the day, but the read and
/// the insert are separate statements: two concurrent requests for the same
/// day can both pass the check and together exceed 24 hours.
pub fn add_activity<R>(
    payload: AddActivityFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Activity>
where
    R: ActivityReader + ActivityWriter,
{
    let owner = owner_of(user)?;

    let existing = repo
        .list_activities(ActivityListQuery::new(owner.clone(), payload.date))
        .map_err(|e| from_repository("Failed to list activities", e))?;
    check_daily_cap(total_minutes(&existing), payload.duration_minutes)?;

    let activity = payload.into_new_activity(owner);
    repo.create_activity(&activity)
        .map_err(|e| from_repository("Failed to create activity", e))
}

/// Apply a partial edit to one of the user's activities.
pub fn update_activity<R>(
    payload: UpdateActivityFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Activity>
where
    R: ActivityWriter,
{
    let owner = owner_of(user)?;

    match repo.update_activity(payload.activity_id, &owner, &payload.update) {
        Ok(Some(activity)) => Ok(activity),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(from_repository("Failed to update activity", e)),
    }
}

/// Remove one of the user's activities, returning the removed record.
pub fn delete_activity<R>(
    payload: DeleteActivityFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Activity>
where
    R: ActivityReader + ActivityWriter,
{
    let owner = owner_of(user)?;

    let activity = match repo.get_activity_by_id(payload.activity_id, &owner) {
        Ok(Some(activity)) => activity,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(from_repository("Failed to get activity", e)),
    };

    match repo.delete_activity(activity.id, &owner) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(activity),
        Err(e) => Err(from_repository("Failed to delete activity", e)),
    }
}
