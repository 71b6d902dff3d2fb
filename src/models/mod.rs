//! Typed records for the analytics dataset.
//!
//! These are flat, immutable snapshots validated once at the ingestion
//! boundary; nothing downstream mutates them.

pub mod inventory_record;
pub mod product;
pub mod promotion;
pub mod sales_record;

pub use inventory_record::InventoryRecord;
pub use product::ProductRecord;
pub use promotion::PromotionRecord;
pub use sales_record::SalesRecord;
