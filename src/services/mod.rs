//! Service layer composing the analytics pipeline over the dataset store.

pub mod analytics;

pub use analytics::AnalyticsService;
