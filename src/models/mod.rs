//! Diesel row types and their conversions to domain entities.

pub mod activity;
#[cfg(feature = "server")]
pub mod config;
