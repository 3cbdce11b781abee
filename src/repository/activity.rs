use chrono::Utc;
use diesel::prelude::*;

use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::activity::{Activity, ActivityUpdate, NewActivity};
use crate::domain::types::{ActivityId, OwnerId};
use crate::models::activity::{
    Activity as DbActivity, ActivityChangeset, NewActivity as DbNewActivity,
};
use crate::repository::{ActivityListQuery, ActivityReader, ActivityWriter, DieselRepository};

impl ActivityReader for DieselRepository {
    fn list_activities(&self, query: ActivityListQuery) -> RepositoryResult<Vec<Activity>> {
        use crate::schema::activities;

        let mut conn = self.conn()?;

        let items = activities::table
            .filter(activities::user_id.eq(query.owner.as_str()))
            .filter(activities::activity_date.eq(query.date.get()))
            .order((activities::created_at.asc(), activities::id.asc()))
            .load::<DbActivity>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Activity>, _>>()?;

        Ok(items)
    }

    fn get_activity_by_id(
        &self,
        id: ActivityId,
        owner: &OwnerId,
    ) -> RepositoryResult<Option<Activity>> {
        use crate::schema::activities;

        let mut conn = self.conn()?;

        let activity = activities::table
            .filter(activities::id.eq(id.get()))
            .filter(activities::user_id.eq(owner.as_str()))
            .first::<DbActivity>(&mut conn)
            .optional()?;

        let activity: Option<Activity> = activity.map(TryInto::try_into).transpose()?;
        Ok(activity)
    }
}

impl ActivityWriter for DieselRepository {
    fn create_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let db_activity: DbNewActivity = activity.clone().into();

        let created = diesel::insert_into(activities::table)
            .values(db_activity)
            .get_result::<DbActivity>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_activity(
        &self,
        id: ActivityId,
        owner: &OwnerId,
        update: &ActivityUpdate,
    ) -> RepositoryResult<Option<Activity>> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let changeset = ActivityChangeset::new(update, Utc::now().naive_utc());

        let updated = diesel::update(
            activities::table
                .filter(activities::id.eq(id.get()))
                .filter(activities::user_id.eq(owner.as_str())),
        )
        .set(&changeset)
        .get_result::<DbActivity>(&mut conn)
        .optional()?;

        let updated: Option<Activity> = updated.map(TryInto::try_into).transpose()?;
        Ok(updated)
    }

    fn delete_activity(&self, id: ActivityId, owner: &OwnerId) -> RepositoryResult<usize> {
        use crate::schema::activities;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            activities::table
                .filter(activities::id.eq(id.get()))
                .filter(activities::user_id.eq(owner.as_str())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
