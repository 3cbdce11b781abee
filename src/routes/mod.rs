pub mod activities;
pub mod api;
pub mod auth;
pub mod main;

/// Day page for `date`, where every mutation redirects back to.
pub fn day_url(date: impl std::fmt::Display) -> String {
    format!("/?date={date}")
}
