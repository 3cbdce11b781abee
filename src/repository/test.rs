use std::sync::Mutex;

use chrono::Utc;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::activity::{Activity, ActivityUpdate, NewActivity};
use crate::domain::types::{ActivityId, OwnerId};
use crate::repository::{ActivityListQuery, ActivityReader, ActivityWriter};

#[derive(Default)]
struct State {
    activities: Vec<Activity>,
    next_id: i32,
    unavailable: bool,
}

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
}

impl TestRepository {
    /// Start with pre-existing records; new ids continue after the highest one.
    pub fn new(activities: Vec<Activity>) -> Self {
        let next_id = activities.iter().map(|a| a.id.get()).max().unwrap_or(0);
        Self {
            state: Mutex::new(State {
                activities,
                next_id,
                unavailable: false,
            }),
        }
    }

    /// Make every subsequent call fail as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unwrap().unavailable = unavailable;
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(state: &State) -> RepositoryResult<()> {
        if state.unavailable {
            Err(DieselError::DatabaseError(
                DatabaseErrorKind::ClosedConnection,
                Box::new("store offline".to_string()),
            )
            .into())
        } else {
            Ok(())
        }
    }
}

impl ActivityReader for TestRepository {
    fn list_activities(&self, query: ActivityListQuery) -> RepositoryResult<Vec<Activity>> {
        let state = self.state.lock().unwrap();
        Self::check_available(&state)?;
        Ok(state
            .activities
            .iter()
            .filter(|a| a.owner == query.owner && a.date == query.date)
            .cloned()
            .collect())
    }

    fn get_activity_by_id(
        &self,
        id: ActivityId,
        owner: &OwnerId,
    ) -> RepositoryResult<Option<Activity>> {
        let state = self.state.lock().unwrap();
        Self::check_available(&state)?;
        Ok(state
            .activities
            .iter()
            .find(|a| a.id == id && &a.owner == owner)
            .cloned())
    }
}

impl ActivityWriter for TestRepository {
    fn create_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity> {
        let mut state = self.state.lock().unwrap();
        Self::check_available(&state)?;
        state.next_id += 1;
        let created = Activity {
            id: ActivityId::new(state.next_id)?,
            owner: activity.owner.clone(),
            name: activity.name.clone(),
            category: activity.category.clone(),
            duration_minutes: activity.duration_minutes,
            date: activity.date,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        };
        state.activities.push(created.clone());
        Ok(created)
    }

    fn update_activity(
        &self,
        id: ActivityId,
        owner: &OwnerId,
        update: &ActivityUpdate,
    ) -> RepositoryResult<Option<Activity>> {
        let mut state = self.state.lock().unwrap();
        Self::check_available(&state)?;
        let Some(activity) = state
            .activities
            .iter_mut()
            .find(|a| a.id == id && &a.owner == owner)
        else {
            return Ok(None);
        };
        update.apply_to(activity, Utc::now().naive_utc());
        Ok(Some(activity.clone()))
    }

    fn delete_activity(&self, id: ActivityId, owner: &OwnerId) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        Self::check_available(&state)?;
        let before = state.activities.len();
        state
            .activities
            .retain(|a| !(a.id == id && &a.owner == owner));
        Ok(before - state.activities.len())
    }
}
