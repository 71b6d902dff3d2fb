use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Static catalog metadata for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductRecord {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[validate(length(min = 1))]
    pub product_name: String,
    /// Free-form category name ("Dairy", "Frozen", ...).
    #[validate(length(min = 1))]
    pub category: String,
    /// Days the product remains sellable before spoilage or obsolescence.
    /// Drives wastage-risk prioritization in the classifier.
    #[validate(range(min = 1))]
    pub shelf_life_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_shelf_life() {
        let product = ProductRecord {
            product_id: "P1".into(),
            product_name: "Milk 1L".into(),
            category: "Dairy".into(),
            shelf_life_days: 0,
        };
        assert!(product.validate().is_err());
    }
}
