//! Domain entities and value objects, free of persistence and HTTP concerns.

pub mod activity;
pub mod analytics;
pub mod types;
