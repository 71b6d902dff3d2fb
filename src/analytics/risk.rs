use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use utoipa::ToSchema;

use super::AnalyticsError;

/// Shelf life at or below this many days marks a product as perishable.
pub const PERISHABLE_SHELF_LIFE_DAYS: u32 = 7;

/// Stock above `predicted_demand * OVERSTOCK_RATIO` counts as excess.
pub const OVERSTOCK_RATIO: f64 = 1.5;

/// Stock risk categories, declared from most to least urgent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, ToSchema,
)]
pub enum RiskLabel {
    /// Current stock will not cover predicted demand.
    StockoutRisk,
    /// Perishable product holding excess stock that may spoil unsold.
    WastageRisk,
    /// Non-perishable product holding excess stock.
    OverstockRisk,
    /// Stock is in balance with predicted demand.
    Healthy,
}

/// Classify a product's stock position against its predicted demand.
///
/// The rules are evaluated in priority order and the first match wins.
/// Rules 2 and 3 share the excess-stock condition on purpose: a perishable
/// item with excess stock is always `WastageRisk`, never `OverstockRisk`,
/// so the shelf-life rule must stay ahead of the generic one.
pub fn classify_stock_risk(
    current_stock: u32,
    predicted_demand: u32,
    shelf_life_days: u32,
) -> Result<RiskLabel, AnalyticsError> {
    if shelf_life_days == 0 {
        return Err(AnalyticsError::InvalidShelfLife);
    }

    let excess = f64::from(current_stock) > f64::from(predicted_demand) * OVERSTOCK_RATIO;

    let label = if current_stock < predicted_demand {
        RiskLabel::StockoutRisk
    } else if shelf_life_days <= PERISHABLE_SHELF_LIFE_DAYS && excess {
        RiskLabel::WastageRisk
    } else if excess {
        RiskLabel::OverstockRisk
    } else {
        RiskLabel::Healthy
    };

    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(50, 100, 30 => RiskLabel::StockoutRisk ; "stock below demand")]
    #[test_case(200, 50, 5 => RiskLabel::WastageRisk ; "perishable excess stock")]
    #[test_case(200, 50, 30 => RiskLabel::OverstockRisk ; "durable excess stock")]
    #[test_case(120, 100, 30 => RiskLabel::Healthy ; "balanced stock")]
    #[test_case(150, 100, 30 => RiskLabel::Healthy ; "exactly at the overstock threshold")]
    #[test_case(0, 0, 7 => RiskLabel::Healthy ; "no stock and no demand")]
    fn classification(stock: u32, demand: u32, shelf_life: u32) -> RiskLabel {
        classify_stock_risk(stock, demand, shelf_life).unwrap()
    }

    #[test]
    fn stockout_outranks_perishability() {
        // Perishable and understocked: rule 1 fires before the shelf-life rule
        // is ever consulted.
        assert_eq!(
            classify_stock_risk(10, 100, 3).unwrap(),
            RiskLabel::StockoutRisk
        );
    }

    #[test]
    fn wastage_outranks_overstock_for_perishables() {
        for shelf_life in 1..=PERISHABLE_SHELF_LIFE_DAYS {
            assert_eq!(
                classify_stock_risk(200, 50, shelf_life).unwrap(),
                RiskLabel::WastageRisk
            );
        }
        assert_eq!(
            classify_stock_risk(200, 50, PERISHABLE_SHELF_LIFE_DAYS + 1).unwrap(),
            RiskLabel::OverstockRisk
        );
    }

    #[test]
    fn zero_shelf_life_is_rejected() {
        assert_eq!(
            classify_stock_risk(10, 10, 0),
            Err(AnalyticsError::InvalidShelfLife)
        );
    }
}
