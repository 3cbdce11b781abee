//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls connecting them live here.

use pushkind_common::repository::errors::RepositoryError;

use crate::domain::types::TypeConstraintError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod service {
    use crate::domain::activity::DailyCapExceeded;
    use crate::domain::types::TypeConstraintError;
    use crate::forms::activities::{
        AddActivityFormError, DeleteActivityFormError, UpdateActivityFormError,
    };
    use crate::services::errors::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<DailyCapExceeded> for ServiceError {
        fn from(val: DailyCapExceeded) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<AddActivityFormError> for ServiceError {
        fn from(val: AddActivityFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<UpdateActivityFormError> for ServiceError {
        fn from(val: UpdateActivityFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<DeleteActivityFormError> for ServiceError {
        fn from(val: DeleteActivityFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }
}
