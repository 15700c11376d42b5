//! HTTP API endpoints

pub mod care;
pub mod health;
pub mod news;
pub mod philippines;
pub mod plant_detail;
pub mod plants;

/// Treat empty and whitespace-only query parameters as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
