//! Compound growth primitives shared by the calculators and the portfolio
//!
//! All formulas treat contributions as paid at the start of each month, so a
//! contribution earns a full month of interest in the month it is made.

/// One month of an annuity-due: add the contribution, then accrue interest
pub fn roll_forward(balance: f64, contribution: f64, monthly_rate: f64) -> f64 {
    (balance + contribution) * (1.0 + monthly_rate)
}

/// Closed-form future value of a lump sum plus a level annuity-due
///
/// `initial * (1+r)^n + monthly * ((1+r)^n - 1) / r * (1+r)`. At `r == 0` the
/// annuity term degenerates to `monthly * n`.
pub fn future_value(initial: f64, monthly: f64, monthly_rate: f64, months: u32) -> f64 {
    let n = months as f64;
    if monthly_rate == 0.0 {
        return initial + monthly * n;
    }
    let growth = (1.0 + monthly_rate).powf(n);
    initial * growth + monthly * ((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate)
}

/// Value after `months` built by compounding each contribution individually
///
/// `initial * (1+r)^m + Σ_{i=0}^{m-1} monthly * (1+r)^(m-i-1)`. Each
/// contribution here is counted as accruing one month less than in
/// [`future_value`], matching how the portfolio dashboard values holdings.
pub fn accumulated_value(initial: f64, monthly: f64, monthly_rate: f64, months: u32) -> f64 {
    let growth = 1.0 + monthly_rate;
    let mut value = initial * growth.powi(months as i32);
    for i in 0..months {
        value += monthly * growth.powi((months - i - 1) as i32);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roll_forward() {
        assert_relative_eq!(roll_forward(1000.0, 100.0, 0.01), 1111.0, max_relative = 1e-12);
    }

    #[test]
    fn test_future_value_matches_month_by_month() {
        let r = 0.0088541666;
        let mut balance = 5000.0;
        for _ in 0..60 {
            balance = roll_forward(balance, 10_000.0, r);
        }
        assert_relative_eq!(future_value(5000.0, 10_000.0, r, 60), balance, max_relative = 1e-9);
    }

    #[test]
    fn test_future_value_zero_rate_is_linear() {
        assert_eq!(future_value(1000.0, 250.0, 0.0, 12), 4000.0);
    }

    #[test]
    fn test_closed_form_equals_discrete_accumulation() {
        // The per-contribution sum lags the annuity-due by one month of
        // interest on the contributions, so scaling it by (1+r) on the
        // annuity part must recover the closed form.
        for &(initial, monthly, r, m) in &[
            (0.0, 10_000.0, 0.0088541666, 60u32),
            (250_000.0, 0.0, 0.01, 120),
            (1_000.0, 50.0, 0.004, 1),
            (75_000.0, 3_500.0, 0.0125, 240),
        ] {
            let annuity = accumulated_value(0.0, monthly, r, m) * (1.0 + r);
            let lump = accumulated_value(initial, 0.0, r, m);
            assert_relative_eq!(lump + annuity, future_value(initial, monthly, r, m), max_relative = 1e-6);
        }
    }

    #[test]
    fn test_accumulated_value_zero_months() {
        assert_eq!(accumulated_value(1234.0, 99.0, 0.01, 0), 1234.0);
    }

    #[test]
    fn test_accumulated_value_zero_rate() {
        assert_eq!(accumulated_value(100.0, 10.0, 0.0, 6), 160.0);
    }
}
