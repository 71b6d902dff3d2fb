use super::AnalyticsError;

/// Fraction of predicted demand held back as safety stock.
pub const SAFETY_STOCK_RATIO: f64 = 0.2;

/// Size a replenishment order to cover predicted demand plus safety stock.
///
/// `safety_stock = floor(0.2 × predicted_demand)`; the recommendation is
/// `(predicted_demand + safety_stock) − current_stock`, clamped at zero.
/// Zero means no replenishment is needed, not an error.
///
/// `lead_time_days` is validated but deliberately not part of the sizing
/// arithmetic: reorder sizing currently ignores supplier lead time. The
/// parameter is kept so callers already carrying the inventory row do not
/// need a different signature if lead-time-aware sizing lands later.
pub fn reorder_quantity(
    predicted_demand: u32,
    lead_time_days: u32,
    current_stock: u32,
) -> Result<u32, AnalyticsError> {
    if lead_time_days == 0 {
        return Err(AnalyticsError::InvalidLeadTime);
    }

    let safety_stock = (f64::from(predicted_demand) * SAFETY_STOCK_RATIO).floor() as i64;
    let quantity = i64::from(predicted_demand) + safety_stock - i64::from(current_stock);

    Ok(quantity.max(0) as u32)
}
