use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::analytics::{AnalyticsSnapshot, aggregate};
use crate::domain::types::ActivityDate;
use crate::repository::{ActivityListQuery, ActivityReader};

use super::activities::owner_of;
use super::errors::from_repository;
use super::ServiceResult;

/// Core business logic for the analytics page and `/api/analytics/{date}`.
///
/// Lists the signed-in user's activities for the date and aggregates them.
/// The snapshot is recomputed on every call.
pub fn show_analytics<R>(
    date: &str,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<AnalyticsSnapshot>
where
    R: ActivityReader,
{
    let owner = owner_of(user)?;
    let date = ActivityDate::parse(date)?;

    let activities = repo
        .list_activities(ActivityListQuery::new(owner, date))
        .map_err(|e| from_repository("Failed to list activities for analytics", e))?;

    Ok(aggregate(activities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::NewActivity;
    use crate::domain::types::{ActivityCategory, ActivityName, DurationMinutes, OwnerId};
    use crate::repository::ActivityWriter;
    use crate::repository::test::TestRepository;
    use crate::services::ServiceError;
    use chrono::DateTime;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "u1".into(),
            email: "test@example.com".into(),
            hub_id: 1,
            name: "Test".into(),
            roles: vec![],
            exp: 0,
        }
    }

    fn seed(repo: &TestRepository, owner: &str, date: &str, category: &str, minutes: i32) {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        repo.create_activity(&NewActivity {
            owner: OwnerId::new(owner).unwrap(),
            name: ActivityName::new(category).unwrap(),
            category: ActivityCategory::new(category).unwrap(),
            duration_minutes: DurationMinutes::new(minutes).unwrap(),
            date: ActivityDate::parse(date).unwrap(),
            created_at: ts,
            updated_at: ts,
        })
        .unwrap();
    }

    #[test]
    fn aggregates_only_the_requested_owner_and_day() {
        let repo = TestRepository::default();
        seed(&repo, "u1", "2024-01-01", "Work", 120);
        seed(&repo, "u1", "2024-01-02", "Work", 300);
        seed(&repo, "u2", "2024-01-01", "Sleep", 480);

        let snapshot = show_analytics("2024-01-01", &sample_user(), &repo).unwrap();
        assert_eq!(snapshot.total_minutes, 120);
        assert_eq!(snapshot.total_activities, 1);
        assert_eq!(snapshot.category_breakdown.len(), 1);
        assert_eq!(snapshot.category_breakdown[0].percentage, 100.0);
    }

    #[test]
    fn empty_day_is_not_an_error() {
        let repo = TestRepository::default();
        let snapshot = show_analytics("2024-01-01", &sample_user(), &repo).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn store_failure_is_unavailable() {
        let repo = TestRepository::default();
        repo.set_unavailable(true);
        let err = show_analytics("2024-01-01", &sample_user(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::Unavailable);
    }
}
