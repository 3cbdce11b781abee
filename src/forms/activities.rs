use std::num::IntErrorKind;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::activity::{ActivityUpdate, NewActivity};
use crate::domain::types::{
    ActivityCategory, ActivityDate, ActivityId, ActivityName, DurationMinutes, MINUTES_PER_DAY,
    OwnerId, TypeConstraintError,
};

/// Parse a duration field the way the entry form does: whole minutes only.
fn parse_duration(value: &str) -> Result<DurationMinutes, String> {
    let too_long = || format!("Duration cannot exceed {MINUTES_PER_DAY} minutes");
    let minutes = match value.trim().parse::<i64>() {
        Ok(minutes) if minutes >= 1 => minutes,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow) => return Err(too_long()),
        _ => return Err("Duration must be at least 1 minute".to_string()),
    };
    i32::try_from(minutes)
        .ok()
        .and_then(|minutes| DurationMinutes::new(minutes).ok())
        .ok_or_else(too_long)
}

#[derive(Deserialize, Validate)]
pub struct AddActivityForm {
    #[validate(length(min = 1, message = "Activity name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Please select a category"))]
    pub category: String,
    pub duration_minutes: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddActivityFormPayload {
    pub name: ActivityName,
    pub category: ActivityCategory,
    pub duration_minutes: DurationMinutes,
    pub date: ActivityDate,
}

impl AddActivityFormPayload {
    pub fn into_new_activity(self, owner: OwnerId) -> NewActivity {
        let now = Utc::now().naive_utc();
        NewActivity {
            owner,
            name: self.name,
            category: self.category,
            duration_minutes: self.duration_minutes,
            date: self.date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddActivityFormError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddActivityFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddActivityFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddActivityForm> for AddActivityFormPayload {
    type Error = AddActivityFormError;

    fn try_from(value: AddActivityForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let duration_minutes =
            parse_duration(&value.duration_minutes).map_err(AddActivityFormError::Validation)?;

        Ok(Self {
            name: ActivityName::new(value.name)?,
            category: ActivityCategory::new(value.category)?,
            duration_minutes,
            date: ActivityDate::parse(&value.date)?,
        })
    }
}

/// Partial edit of an activity. Omitted fields are left unchanged.
#[derive(Deserialize, Validate, Default)]
pub struct UpdateActivityForm {
    #[validate(length(min = 1, message = "Activity name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Please select a category"))]
    pub category: Option<String>,
    pub duration_minutes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateActivityFormPayload {
    pub activity_id: ActivityId,
    pub update: ActivityUpdate,
}

#[derive(Debug, Error)]
pub enum UpdateActivityFormError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateActivityFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateActivityFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl UpdateActivityForm {
    /// Validate the form for the activity addressed by the request path.
    pub fn into_payload(
        self,
        activity_id: i32,
    ) -> Result<UpdateActivityFormPayload, UpdateActivityFormError> {
        self.validate()?;

        let duration_minutes = self
            .duration_minutes
            .as_deref()
            .map(parse_duration)
            .transpose()
            .map_err(UpdateActivityFormError::Validation)?;

        Ok(UpdateActivityFormPayload {
            activity_id: ActivityId::new(activity_id)?,
            update: ActivityUpdate {
                name: self.name.map(ActivityName::new).transpose()?,
                category: self.category.map(ActivityCategory::new).transpose()?,
                duration_minutes,
            },
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteActivityForm {
    #[validate(range(min = 1))]
    pub activity_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteActivityFormPayload {
    pub activity_id: ActivityId,
}

#[derive(Debug, Error)]
pub enum DeleteActivityFormError {
    #[error("Delete activity form validation failed: {0}")]
    Validation(String),
    #[error("{0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for DeleteActivityFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for DeleteActivityFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<DeleteActivityForm> for DeleteActivityFormPayload {
    type Error = DeleteActivityFormError;

    fn try_from(value: DeleteActivityForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            activity_id: ActivityId::new(value.activity_id)?,
        })
    }
}
