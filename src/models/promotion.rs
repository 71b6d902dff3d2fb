use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A scheduled discount window for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_window"))]
pub struct PromotionRecord {
    #[validate(length(min = 1))]
    pub product_id: String,
    pub promo_start: NaiveDate,
    pub promo_end: NaiveDate,
    #[validate(range(min = 1, max = 100))]
    pub discount_percent: u32,
}

impl PromotionRecord {
    /// Whether the promotion window covers `date` (both endpoints inclusive).
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.promo_start <= date && date <= self.promo_end
    }
}

fn validate_window(promo: &PromotionRecord) -> Result<(), ValidationError> {
    if promo.promo_end < promo.promo_start {
        return Err(ValidationError::new("promo_end_before_promo_start"));
    }
    Ok(())
}
