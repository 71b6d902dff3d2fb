//! HTTP handlers grouped by concern.

pub mod analytics;
pub mod datasets;
pub mod health;
