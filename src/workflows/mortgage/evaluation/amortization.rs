/// Fixed-rate installment that fully repays `principal` over `years`.
///
/// `annual_rate` is a plain percentage. A zero rate spreads the principal
/// evenly over the term.
pub fn calculate_monthly_payment(principal: f64, annual_rate: f64, years: u32) -> f64 {
    let monthly_rate = (annual_rate / 100.0) / 12.0;
    let total_months = f64::from(years * 12);

    if monthly_rate == 0.0 {
        return principal / total_months;
    }

    let growth = (1.0 + monthly_rate).powf(total_months);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// Payment is sustainable only when strictly below `ratio` of monthly income.
pub fn is_sustainable(monthly_payment: f64, monthly_income: f64, ratio: f64) -> bool {
    monthly_payment < ratio * monthly_income
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_interest_divides_principal_evenly() {
        assert_abs_diff_eq!(calculate_monthly_payment(12_000.0, 0.0, 10), 100.0);
    }

    #[test]
    fn thirty_year_reference_payment_at_six_percent() {
        assert_abs_diff_eq!(
            calculate_monthly_payment(300_000.0, 6.0, 30),
            1798.65,
            epsilon = 0.005
        );
    }

    #[test]
    fn shorter_terms_cost_more_per_month() {
        let fifteen = calculate_monthly_payment(250_000.0, 5.5, 15);
        let thirty = calculate_monthly_payment(250_000.0, 5.5, 30);
        assert!(fifteen > thirty);
        // Total repaid always covers the principal.
        assert!(thirty * 360.0 > 250_000.0);
    }

    #[test]
    fn sustainability_uses_strict_inequality() {
        let monthly_income = 10_000.0;
        let threshold = 3_000.0;

        assert!(!is_sustainable(threshold, monthly_income, 0.3));
        assert!(is_sustainable(threshold - 0.01, monthly_income, 0.3));
        assert!(!is_sustainable(threshold + 0.01, monthly_income, 0.3));
    }
}
