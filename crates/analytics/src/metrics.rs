use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The investment metrics derived from a single deal.
///
/// This struct is the output of the `MetricsEngine`. Fields suffixed with a
/// percentage in their documentation are scaled 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsResult {
    /// Gross rental income minus operating expenses, per year.
    pub annual_cash_flow: Decimal,
    /// Annual cash flow over cash invested (%).
    pub cash_on_cash_return: Decimal,
    /// NOI over purchase price (%).
    pub cap_rate: Decimal,
    /// NOI over total debt service, as a plain ratio.
    pub dscr: Decimal,
    /// Gross rental income over purchase price (%).
    pub gross_rental_yield: Decimal,
    pub price_per_sqft: Decimal,
    /// Operating expenses over gross rental income (%).
    pub operating_expense_ratio: Decimal,
    /// Annual cash flow over cash invested (%). Same formula as
    /// `cash_on_cash_return`; both are kept for consumers that read either.
    pub roi: Decimal,
    /// Occupied units over total units (%).
    pub occupancy_rate: Decimal,
}

impl MetricsResult {
    /// A zeroed-out result.
    pub fn zero() -> Self {
        Self {
            annual_cash_flow: Decimal::ZERO,
            cash_on_cash_return: Decimal::ZERO,
            cap_rate: Decimal::ZERO,
            dscr: Decimal::ZERO,
            gross_rental_yield: Decimal::ZERO,
            price_per_sqft: Decimal::ZERO,
            operating_expense_ratio: Decimal::ZERO,
            roi: Decimal::ZERO,
            occupancy_rate: Decimal::ZERO,
        }
    }
}

impl Default for MetricsResult {
    fn default() -> Self {
        Self::zero()
    }
}
