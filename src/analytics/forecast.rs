use super::AnalyticsError;

/// Project total demand over the next `horizon` days from daily sales history.
///
/// `history[i]` is the quantity sold on the i-th observed day. Day indices are
/// positional: the first record is day 0, the second day 1, and so on. Gaps in
/// the calendar are compressed away by the caller supplying records already
/// ordered by date.
///
/// Fits an ordinary least-squares line `quantity ≈ slope · day + intercept`
/// over the history, evaluates it at the `horizon` day indices immediately
/// following the observed range, and returns the truncated, non-negative sum
/// of the predictions. A declining trend never produces negative demand.
pub fn forecast_demand(history: &[u32], horizon: u32) -> Result<u32, AnalyticsError> {
    if history.is_empty() {
        return Err(AnalyticsError::EmptyHistory);
    }
    if horizon == 0 {
        return Err(AnalyticsError::InvalidHorizon);
    }

    let n = history.len() as f64;
    let mean_day = (n - 1.0) / 2.0;
    let mean_qty = history.iter().map(|&q| q as f64).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (day, &qty) in history.iter().enumerate() {
        let dx = day as f64 - mean_day;
        covariance += dx * (qty as f64 - mean_qty);
        variance += dx * dx;
    }

    // A single observation has zero variance in the day index; the fit
    // degenerates to a flat line at the observed value.
    let slope = if variance == 0.0 {
        0.0
    } else {
        covariance / variance
    };
    let intercept = mean_qty - slope * mean_day;

    let first_future_day = history.len() as u64;
    let total: f64 = (first_future_day..first_future_day + u64::from(horizon))
        .map(|day| slope * day as f64 + intercept)
        .sum();

    Ok(total.max(0.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_history_projects_flat_demand() {
        let history = vec![8; 14];
        assert_eq!(forecast_demand(&history, 7).unwrap(), 8 * 7);
    }

    #[test]
    fn rising_trend_matches_closed_form() {
        // slope 2, intercept 10; days 3..=9 predict 16+18+20+22+24+26+28 = 154
        let history = [10, 12, 14];
        assert_eq!(forecast_demand(&history, 7).unwrap(), 154);
    }

    #[test]
    fn declining_trend_clamps_at_zero() {
        let history = [50, 30, 10];
        assert_eq!(forecast_demand(&history, 7).unwrap(), 0);
    }

    #[test]
    fn single_observation_degenerates_to_flat_line() {
        assert_eq!(forecast_demand(&[25], 4).unwrap(), 100);
    }

    #[test]
    fn fractional_sums_truncate_toward_zero() {
        // slope 1/2, intercept 5/6: days 3 and 4 predict 2.33.. + 2.83.. = 5.16..
        let history = [1, 1, 2];
        assert_eq!(forecast_demand(&history, 2).unwrap(), 5);
    }

    #[test]
    fn empty_history_is_rejected() {
        assert_eq!(forecast_demand(&[], 7), Err(AnalyticsError::EmptyHistory));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        assert_eq!(
            forecast_demand(&[10], 0),
            Err(AnalyticsError::InvalidHorizon)
        );
    }
}
