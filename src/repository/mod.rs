use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::activity::{Activity, ActivityUpdate, NewActivity};
use crate::domain::types::{ActivityDate, ActivityId, OwnerId};

pub mod activity;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing activities.
///
/// Both filters are exact matches; there is no range or partial matching.
#[derive(Debug, Clone)]
pub struct ActivityListQuery {
    pub owner: OwnerId,
    pub date: ActivityDate,
}

impl ActivityListQuery {
    pub fn new(owner: OwnerId, date: ActivityDate) -> Self {
        Self { owner, date }
    }
}

/// Read-only operations for activity records.
pub trait ActivityReader {
    /// List the owner's activities for one day, oldest first.
    fn list_activities(&self, query: ActivityListQuery) -> RepositoryResult<Vec<Activity>>;
    /// Retrieve an activity by id within the owner's scope.
    fn get_activity_by_id(&self, id: ActivityId, owner: &OwnerId)
    -> RepositoryResult<Option<Activity>>;
}

/// Write operations for activity records.
pub trait ActivityWriter {
    /// Persist a new activity and return it with its assigned id.
    fn create_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity>;
    /// Apply a partial update. Returns `None` outside the owner's scope.
    fn update_activity(
        &self,
        id: ActivityId,
        owner: &OwnerId,
        update: &ActivityUpdate,
    ) -> RepositoryResult<Option<Activity>>;
    /// Delete an activity, returning the number of removed rows.
    fn delete_activity(&self, id: ActivityId, owner: &OwnerId) -> RepositoryResult<usize>;
}
