/*!
 * # Analytics Module
 *
 * The core decision pipeline of the StockSense API: demand forecasting,
 * stock risk classification, and reorder sizing.
 *
 * All three operations are pure, synchronous functions with no caching or
 * shared state. They may be invoked concurrently from any number of call
 * sites (once per product per report is typical) without coordination.
 */

pub mod forecast;
pub mod reorder;
pub mod risk;

pub use forecast::forecast_demand;
pub use reorder::reorder_quantity;
pub use risk::{classify_stock_risk, RiskLabel};

use thiserror::Error;

/// Contract violations surfaced by the analytics pipeline.
///
/// The pipeline performs no I/O; these are the only failure modes and every
/// one of them indicates a caller-side precondition breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("sales history must contain at least one observation")]
    EmptyHistory,

    #[error("forecast horizon must be at least one day")]
    InvalidHorizon,

    #[error("shelf life must be at least one day")]
    InvalidShelfLife,

    #[error("lead time must be at least one day")]
    InvalidLeadTime,
}
