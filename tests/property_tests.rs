//! Property-based tests for the analytics pipeline.
//!
//! These verify the pipeline's invariants across a wide range of inputs,
//! catching edge cases the example-based tests might miss.

use proptest::prelude::*;

use stocksense_api::analytics::{
    classify_stock_risk, forecast_demand, reorder_quantity, RiskLabel,
};

fn history_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..10_000, 1..120)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn forecast_is_total_over_valid_inputs(history in history_strategy(), horizon in 1u32..60) {
        // Any non-empty history forecasts without error, whatever the trend.
        prop_assert!(forecast_demand(&history, horizon).is_ok());
    }

    #[test]
    fn steep_declines_clamp_to_zero(step in 50u32..100, len in 5usize..30, horizon in 2u32..20) {
        // history[i] = step*len - step*i: the continuation is 0, -step, ...
        // so the horizon sum is negative before the clamp.
        let history: Vec<u32> = (0..len as u32).map(|i| step * (len as u32 - i)).collect();
        prop_assert_eq!(forecast_demand(&history, horizon).unwrap(), 0);
    }

    #[test]
    fn flat_history_projects_exactly(value in 0u32..5_000, len in 1usize..60, horizon in 1u32..30) {
        let history = vec![value; len];
        let forecast = forecast_demand(&history, horizon).unwrap();
        prop_assert_eq!(forecast, value * horizon);
    }

    #[test]
    fn arithmetic_trend_matches_closed_form(
        start in 0u32..1_000,
        step in 0u32..50,
        len in 2usize..40,
        horizon in 1u32..20,
    ) {
        let history: Vec<u32> = (0..len as u32).map(|i| start + step * i).collect();
        let forecast = forecast_demand(&history, horizon).unwrap();

        // The fitted line reproduces the sequence exactly, so the forecast is
        // the sum of the continued sequence over the horizon.
        let expected: u64 = (len as u64..len as u64 + u64::from(horizon))
            .map(|day| u64::from(start) + u64::from(step) * day)
            .sum();
        let diff = (i64::try_from(expected).unwrap() - i64::from(forecast)).abs();
        // Allow one unit of slack for float truncation at the boundary.
        prop_assert!(diff <= 1, "forecast {} vs expected {}", forecast, expected);
    }

    #[test]
    fn understocked_is_always_stockout(
        stock in 0u32..10_000,
        demand in 1u32..10_000,
        shelf_life in 1u32..400,
    ) {
        prop_assume!(stock < demand);
        let label = classify_stock_risk(stock, demand, shelf_life).unwrap();
        prop_assert_eq!(label, RiskLabel::StockoutRisk);
    }

    #[test]
    fn perishable_excess_is_never_overstock(
        demand in 0u32..10_000,
        shelf_life in 1u32..=7,
        surplus in 1u32..5_000,
    ) {
        let stock = (demand as f64 * 1.5) as u32 + surplus;
        prop_assume!(stock as f64 > demand as f64 * 1.5);
        let label = classify_stock_risk(stock, demand, shelf_life).unwrap();
        prop_assert_eq!(label, RiskLabel::WastageRisk);
    }

    #[test]
    fn classification_is_total(
        stock in 0u32..100_000,
        demand in 0u32..100_000,
        shelf_life in 1u32..1_000,
    ) {
        // Any in-contract input classifies without error.
        classify_stock_risk(stock, demand, shelf_life).unwrap();
    }

    #[test]
    fn reorder_is_monotone_in_stock(
        demand in 0u32..10_000,
        lead_time in 1u32..30,
        stock in 0u32..10_000,
    ) {
        let at_stock = reorder_quantity(demand, lead_time, stock).unwrap();
        let with_more_stock = reorder_quantity(demand, lead_time, stock + 1).unwrap();
        prop_assert!(with_more_stock <= at_stock);
    }

    #[test]
    fn reorder_is_monotone_in_demand(
        demand in 0u32..10_000,
        lead_time in 1u32..30,
        stock in 0u32..10_000,
    ) {
        let at_demand = reorder_quantity(demand, lead_time, stock).unwrap();
        let with_more_demand = reorder_quantity(demand + 1, lead_time, stock).unwrap();
        prop_assert!(with_more_demand >= at_demand);
    }

    #[test]
    fn reorder_never_exceeds_demand_plus_safety(
        demand in 0u32..10_000,
        lead_time in 1u32..30,
        stock in 0u32..10_000,
    ) {
        let quantity = reorder_quantity(demand, lead_time, stock).unwrap();
        let ceiling = u64::from(demand) + u64::from(demand) / 5;
        prop_assert!(u64::from(quantity) <= ceiling);
    }
}
