//! Session-scoped view of one day's activities.
//!
//! [`DayTracker`] is what an interactive client holds for the day it shows.
//! It keeps the list from the last successful fetch, checks new entries
//! against that cached total and re-reads the whole day after every
//! mutation instead of patching its cache.

use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::activity::{
    Activity, ActivityUpdate, check_daily_cap, remaining_minutes, total_minutes,
};
use crate::domain::analytics::{AnalyticsSnapshot, aggregate};
use crate::domain::types::{ActivityDate, ActivityId, OwnerId};
use crate::forms::activities::AddActivityFormPayload;
use crate::identity::{CurrentIdentity, IdentitySubscription};
use crate::repository::{ActivityListQuery, ActivityReader, ActivityWriter};
use crate::services::errors::from_repository;
use crate::services::{ServiceError, ServiceResult};

pub struct DayTracker<R> {
    repo: R,
    date: ActivityDate,
    identity: IdentitySubscription,
    owner: Option<OwnerId>,
    activities: Vec<Activity>,
    error: Option<String>,
}

impl<R> DayTracker<R>
where
    R: ActivityReader + ActivityWriter,
{
    /// Create a tracker and perform the initial fetch if someone is signed in.
    pub fn new(repo: R, date: ActivityDate, identity: IdentitySubscription) -> Self {
        let owner = owner_from(identity.current());
        let mut tracker = Self {
            repo,
            date,
            identity,
            owner,
            activities: Vec::new(),
            error: None,
        };
        // failures are recorded in `error`
        let _ = tracker.refresh();
        tracker
    }

    pub fn date(&self) -> ActivityDate {
        self.date
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn total_minutes(&self) -> i64 {
        total_minutes(&self.activities)
    }

    pub fn remaining_minutes(&self) -> i64 {
        remaining_minutes(self.total_minutes())
    }

    /// Message of the last failed operation, cleared by the next successful fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn analytics(&self) -> AnalyticsSnapshot {
        aggregate(self.activities.clone())
    }

    /// Pick up an identity change published since the last call.
    ///
    /// Returns `true` if the identity changed. A new identity triggers a fetch;
    /// signing out clears the cached list.
    pub fn sync_identity(&mut self) -> bool {
        let Some(identity) = self.identity.poll_change() else {
            return false;
        };
        self.owner = owner_from(identity);
        if self.owner.is_some() {
            let _ = self.refresh();
        } else {
            self.activities.clear();
            self.error = None;
        }
        true
    }

    /// Re-read the day. On failure the previous list is kept.
    pub fn refresh(&mut self) -> ServiceResult<()> {
        let Some(owner) = self.owner.clone() else {
            return Ok(());
        };

        match self
            .repo
            .list_activities(ActivityListQuery::new(owner, self.date))
        {
            Ok(activities) => {
                self.activities = activities;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail(from_repository("Failed to load activities", e))),
        }
    }

    /// Log a new activity, checked against the total from the last fetch.
    pub fn create(&mut self, payload: AddActivityFormPayload) -> ServiceResult<()> {
        let owner = self.require_owner()?;
        if payload.date != self.date {
            return Err(self.fail(ServiceError::Form(format!(
                "Activity date {} does not match the tracked day {}",
                payload.date, self.date
            ))));
        }
        if let Err(e) = check_daily_cap(self.total_minutes(), payload.duration_minutes) {
            return Err(self.fail(e.into()));
        }

        let activity = payload.into_new_activity(owner);
        if let Err(e) = self.repo.create_activity(&activity) {
            return Err(self.fail(from_repository("Failed to create activity", e)));
        }
        self.refresh()
    }

    pub fn update(&mut self, id: ActivityId, update: &ActivityUpdate) -> ServiceResult<()> {
        let owner = self.require_owner()?;
        let result = self
            .repo
            .update_activity(id, &owner, update)
            .map(|updated| updated.is_some());
        self.reload_after(result, "Failed to update activity")
    }

    pub fn delete(&mut self, id: ActivityId) -> ServiceResult<()> {
        let owner = self.require_owner()?;
        let result = self
            .repo
            .delete_activity(id, &owner)
            .map(|removed| removed > 0);
        self.reload_after(result, "Failed to delete activity")
    }

    /// `result` carries whether the write matched a record.
    fn reload_after(&mut self, result: RepositoryResult<bool>, context: &str) -> ServiceResult<()> {
        match result {
            Ok(true) => self.refresh(),
            Ok(false) => {
                // removed elsewhere; reconcile with the store
                let _ = self.refresh();
                Err(self.fail(ServiceError::NotFound))
            }
            Err(e) => Err(self.fail(from_repository(context, e))),
        }
    }

    fn require_owner(&mut self) -> ServiceResult<OwnerId> {
        match self.owner.clone() {
            Some(owner) => Ok(owner),
            None => Err(self.fail(ServiceError::Unauthorized)),
        }
    }

    fn fail(&mut self, error: ServiceError) -> ServiceError {
        self.error = Some(match &error {
            ServiceError::Unauthorized => "Not authenticated".to_string(),
            ServiceError::NotFound => "Activity no longer exists".to_string(),
            ServiceError::Unavailable => "Failed to reach the activity store".to_string(),
            ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
                message.clone()
            }
        });
        error
    }
}

fn owner_from(identity: CurrentIdentity) -> Option<OwnerId> {
    identity.and_then(|user| OwnerId::new(user.sub).ok())
}
