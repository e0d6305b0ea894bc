//! Marketing arithmetic used across the dashboard. Every ratio returns 0
//! when its denominator is 0; the UI renders a dash, never a NaN.

/// Return on ad spend, as a multiple.
pub fn roas(revenue: f64, spend: f64) -> f64 {
    if spend == 0.0 {
        return 0.0;
    }
    revenue / spend
}

/// Cost per acquisition.
pub fn cpa(spend: f64, conversions: u64) -> f64 {
    if conversions == 0 {
        return 0.0;
    }
    spend / conversions as f64
}

/// Click-through rate, in percent.
pub fn ctr(clicks: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    clicks as f64 / impressions as f64 * 100.0
}

/// Conversions per click, in percent.
pub fn conversion_rate(conversions: u64, clicks: u64) -> f64 {
    if clicks == 0 {
        return 0.0;
    }
    conversions as f64 / clicks as f64 * 100.0
}

/// Projected revenue from a conversion count and average order value.
pub fn revenue(conversions: u64, average_order_value: f64) -> f64 {
    conversions as f64 * average_order_value
}

/// Profit margin, in percent.
pub fn margin(revenue: f64, costs: f64) -> f64 {
    if revenue == 0.0 {
        return 0.0;
    }
    (revenue - costs) / revenue * 100.0
}

/// Period-over-period change, in percent.
pub fn growth(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_compute_in_the_happy_case() {
        assert!((roas(4000.0, 1000.0) - 4.0).abs() < 1e-9);
        assert!((cpa(500.0, 20) - 25.0).abs() < 1e-9);
        assert!((ctr(25, 1000) - 2.5).abs() < 1e-9);
        assert!((conversion_rate(5, 200) - 2.5).abs() < 1e-9);
        assert!((revenue(10, 49.99) - 499.9).abs() < 1e-9);
        assert!((margin(1000.0, 600.0) - 40.0).abs() < 1e-9);
        assert!((growth(120.0, 100.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominators_return_zero() {
        assert_eq!(roas(4000.0, 0.0), 0.0);
        assert_eq!(cpa(500.0, 0), 0.0);
        assert_eq!(ctr(25, 0), 0.0);
        assert_eq!(conversion_rate(5, 0), 0.0);
        assert_eq!(margin(0.0, 600.0), 0.0);
        assert_eq!(growth(120.0, 0.0), 0.0);
    }
}
