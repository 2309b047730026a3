use crate::metrics::MetricsResult;
use core_types::{FinancialRecord, PropertyRecord};
use rust_decimal::Decimal;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A stateless calculator for deriving investment metrics from a deal.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating investment metrics.
    ///
    /// # Arguments
    ///
    /// * `property` - The property being evaluated (price, square footage).
    /// * `financial` - The annual income, cost and occupancy figures.
    ///
    /// # Returns
    ///
    /// A `MetricsResult`. Every ratio whose denominator is zero or negative is
    /// reported as zero, so this never fails.
    pub fn compute(&self, property: &PropertyRecord, financial: &FinancialRecord) -> MetricsResult {
        let annual_cash_flow = financial
            .gross_rental_income
            .saturating_sub(financial.operating_expenses);

        MetricsResult {
            annual_cash_flow,
            cash_on_cash_return: percentage(annual_cash_flow, financial.cash_invested),
            cap_rate: percentage(financial.net_operating_income, property.price),
            dscr: ratio(financial.net_operating_income, financial.total_debt_service),
            gross_rental_yield: percentage(financial.gross_rental_income, property.price),
            price_per_sqft: ratio(property.price, Decimal::from(property.square_footage)),
            operating_expense_ratio: percentage(
                financial.operating_expenses,
                financial.gross_rental_income,
            ),
            roi: percentage(annual_cash_flow, financial.cash_invested),
            occupancy_rate: percentage(
                Decimal::from(financial.occupied_units),
                Decimal::from(financial.total_units),
            ),
        }
    }
}

/// Computes metrics with a default `MetricsEngine`.
pub fn compute_metrics(property: &PropertyRecord, financial: &FinancialRecord) -> MetricsResult {
    MetricsEngine::new().compute(property, financial)
}

/// `numerator / denominator`, or zero when the denominator is not positive.
fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    // Only overflows for quotients beyond the Decimal range; clamp to the bound.
    numerator.checked_div(denominator).unwrap_or(if numerator.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// `numerator / denominator * 100`, or zero when the denominator is not positive.
fn percentage(numerator: Decimal, denominator: Decimal) -> Decimal {
    ratio(numerator, denominator).saturating_mul(ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample() -> (PropertyRecord, FinancialRecord) {
        (PropertyRecord::default(), FinancialRecord::default())
    }

    #[test]
    fn computes_sample_deal() {
        let (property, financial) = sample();
        let m = compute_metrics(&property, &financial);

        assert_eq!(m.annual_cash_flow, dec!(30000));
        assert_eq!(m.cash_on_cash_return.round_dp(4), dec!(42.8571));
        assert_eq!(m.cap_rate.round_dp(4), dec!(8.5714));
        assert_eq!(m.dscr, dec!(1.25));
        assert_eq!(m.gross_rental_yield, dec!(12));
        assert_eq!(m.price_per_sqft.round_dp(2), dec!(233.33));
        assert_eq!(m.operating_expense_ratio.round_dp(4), dec!(28.5714));
        assert_eq!(m.roi.round_dp(4), dec!(42.8571));
        assert_eq!(m.occupancy_rate, dec!(75));
    }

    #[test]
    fn zero_cash_invested_zeroes_returns() {
        let (property, mut financial) = sample();
        financial.cash_invested = Decimal::ZERO;
        let m = compute_metrics(&property, &financial);
        assert_eq!(m.cash_on_cash_return, Decimal::ZERO);
        assert_eq!(m.roi, Decimal::ZERO);
        // Unaffected metrics still computed.
        assert_eq!(m.dscr, dec!(1.25));
    }

    #[test]
    fn zero_price_zeroes_price_based_ratios() {
        let (mut property, financial) = sample();
        property.price = Decimal::ZERO;
        let m = compute_metrics(&property, &financial);
        assert_eq!(m.cap_rate, Decimal::ZERO);
        assert_eq!(m.gross_rental_yield, Decimal::ZERO);
        assert_eq!(m.price_per_sqft, Decimal::ZERO);
    }

    #[test]
    fn zero_debt_service_zeroes_dscr() {
        let (property, mut financial) = sample();
        financial.total_debt_service = Decimal::ZERO;
        assert_eq!(compute_metrics(&property, &financial).dscr, Decimal::ZERO);
    }

    #[test]
    fn zero_square_footage_zeroes_price_per_sqft() {
        let (mut property, financial) = sample();
        property.square_footage = 0;
        assert_eq!(
            compute_metrics(&property, &financial).price_per_sqft,
            Decimal::ZERO
        );
    }

    #[test]
    fn zero_gross_income_zeroes_expense_ratio_but_keeps_negative_cash_flow() {
        let (property, mut financial) = sample();
        financial.gross_rental_income = Decimal::ZERO;
        let m = compute_metrics(&property, &financial);
        assert_eq!(m.operating_expense_ratio, Decimal::ZERO);
        assert_eq!(m.annual_cash_flow, dec!(-12000));
        assert_eq!(m.cash_on_cash_return.round_dp(4), dec!(-17.1429));
    }

    #[test]
    fn all_zero_financials_yield_all_zero_metrics() {
        let property = PropertyRecord::default();
        let financial = FinancialRecord {
            net_operating_income: Decimal::ZERO,
            cash_invested: Decimal::ZERO,
            gross_rental_income: Decimal::ZERO,
            operating_expenses: Decimal::ZERO,
            total_debt_service: Decimal::ZERO,
            occupied_units: 0,
            total_units: 1,
        };
        let m = compute_metrics(&property, &financial);
        let expected = MetricsResult {
            price_per_sqft: m.price_per_sqft,
            ..MetricsResult::zero()
        };
        assert_eq!(m, expected);
        assert_eq!(m.occupancy_rate, Decimal::ZERO);
    }

    #[test]
    fn zero_total_units_is_guarded() {
        let (property, mut financial) = sample();
        financial.total_units = 0;
        assert_eq!(
            compute_metrics(&property, &financial).occupancy_rate,
            Decimal::ZERO
        );
    }

    #[test]
    fn roi_always_matches_cash_on_cash() {
        let (property, base) = sample();
        for (gross, opex, cash) in [
            (dec!(42000), dec!(12000), dec!(70000)),
            (dec!(0), dec!(5000), dec!(1)),
            (dec!(99999.99), dec!(0.01), dec!(3)),
            (dec!(10), dec!(10), dec!(0)),
        ] {
            let financial = FinancialRecord {
                gross_rental_income: gross,
                operating_expenses: opex,
                cash_invested: cash,
                ..base.clone()
            };
            let m = compute_metrics(&property, &financial);
            assert_eq!(m.roi, m.cash_on_cash_return);
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let (property, financial) = sample();
        let engine = MetricsEngine::new();
        let first = engine.compute(&property, &financial);
        let second = engine.compute(&property, &financial);
        assert_eq!(first, second);
        assert_eq!(first.cap_rate.serialize(), second.cap_rate.serialize());
    }

    #[test]
    fn extreme_values_do_not_panic() {
        let property = PropertyRecord {
            price: dec!(0.01),
            square_footage: 1,
            ..PropertyRecord::default()
        };
        let financial = FinancialRecord {
            net_operating_income: Decimal::MAX,
            gross_rental_income: Decimal::MAX,
            operating_expenses: Decimal::ZERO,
            cash_invested: dec!(0.0000001),
            total_debt_service: dec!(0.0000001),
            ..FinancialRecord::default()
        };
        let m = compute_metrics(&property, &financial);
        assert_eq!(m.cap_rate, Decimal::MAX);
        assert_eq!(m.dscr, Decimal::MAX);
        assert_eq!(m.roi, m.cash_on_cash_return);
    }
}
