//! HTTP request handlers, grouped by resource.

pub mod charts;
pub mod dashboard;
pub mod health;
pub mod keywords;
pub mod patients;
pub mod retention;
pub mod sessions;
pub mod settings;
pub mod templates;
