use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// One day of sales for a product at a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct SalesRecord {
    pub date: NaiveDate,
    #[validate(length(min = 1))]
    pub store_id: String,
    #[validate(length(min = 1))]
    pub product_id: String,
    pub quantity_sold: u32,
    /// Unit price on the day, after any promotional discount.
    #[validate(custom = "validate_positive_price")]
    pub price: Decimal,
    /// Whether the product was on promotion that day.
    #[serde(default)]
    pub is_promo: bool,
}

fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("price_must_be_positive"));
    }
    Ok(())
}
