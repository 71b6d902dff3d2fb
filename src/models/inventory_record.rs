use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Current stock position of a product at a store. One row per
/// (store, product) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct InventoryRecord {
    #[validate(length(min = 1))]
    pub store_id: String,
    #[validate(length(min = 1))]
    pub product_id: String,
    pub current_stock: u32,
    /// Days between placing a reorder and receiving stock.
    #[validate(range(min = 1))]
    pub lead_time_days: u32,
}
