pub mod activities;
pub mod analytics;
pub mod errors;

pub use errors::{ServiceError, ServiceResult};
